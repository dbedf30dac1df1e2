//! Onboard Escalation - routing cases to human staff
//!
//! Escalations are triggered by low AI confidence or high risk. The router
//! scores every eligible staff member against the case (load, urgency,
//! expertise, satisfaction, speed) and assigns the best match; when nobody
//! qualifies the escalation stays visible in the unassigned queue.
//!
//! ```text
//! EscalationRequest ──► EscalationRouter::escalate
//!                             │ auto-assign enabled?
//!                             ├── yes ──► score staff ──► assign best
//!                             └── no / nobody eligible ──► queue()
//! ```

pub mod config;
pub mod error;
pub mod escalation;
pub mod router;
pub mod staff;
pub mod summary;

pub use config::AssignmentRules;
pub use error::{EscalationError, EscalationResult};
pub use escalation::{
    AssessmentContext, Assignment, EscalationReason, EscalationRequest, Resolution,
    ResolutionAction, StaffEscalation, Urgency, UserContext,
};
pub use router::EscalationRouter;
pub use staff::{StaffMember, StaffRole, StaffStatus};
pub use summary::{ConfidenceBreakdown, EscalationSummary, QuickAction};
