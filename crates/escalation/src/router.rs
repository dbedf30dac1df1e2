//! Escalation router
//!
//! Owns the staff roster and all escalation records. Assignment is a
//! synchronous score-and-pick over the roster; load check and increment
//! happen inside the same `&mut self` call so a staff member can never be
//! overcommitted by interleaved escalations.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::AssignmentRules;
use crate::error::{EscalationError, EscalationResult};
use crate::escalation::{EscalationRequest, Resolution, StaffEscalation, Urgency};
use crate::staff::{StaffMember, StaffStatus};

/// Routes escalations to the best available staff member
pub struct EscalationRouter {
    rules: AssignmentRules,
    /// Roster in registration order; ties in scoring go to the earliest entry
    staff: Vec<StaffMember>,
    escalations: Vec<StaffEscalation>,
}

impl EscalationRouter {
    /// Create a router with the given assignment rules and an empty roster
    pub fn new(rules: AssignmentRules) -> Self {
        Self {
            rules,
            staff: Vec::new(),
            escalations: Vec::new(),
        }
    }

    /// Add a staff member to the roster
    pub fn register_staff(&mut self, member: StaffMember) {
        info!(staff_id = %member.id, role = %member.role, "Staff member registered");
        self.staff.push(member);
    }

    /// Look up a staff member by id
    pub fn staff_member(&self, staff_id: &str) -> Option<&StaffMember> {
        self.staff.iter().find(|s| s.id == staff_id)
    }

    /// Update a staff member's availability
    pub fn set_staff_status(
        &mut self,
        staff_id: &str,
        status: StaffStatus,
    ) -> EscalationResult<()> {
        let member = self
            .staff
            .iter_mut()
            .find(|s| s.id == staff_id)
            .ok_or_else(|| EscalationError::StaffNotFound(staff_id.to_string()))?;
        member.status = status;
        Ok(())
    }

    /// Create an escalation and, when auto-assignment is enabled, assign it
    /// to the highest-scoring eligible staff member.
    ///
    /// No eligible staff is not an error: the escalation is created
    /// unassigned and stays visible in [`queue`](Self::queue).
    pub fn escalate(&mut self, request: EscalationRequest, now: DateTime<Utc>) -> &StaffEscalation {
        let mut escalation = StaffEscalation::from_request(request, now);

        if self.rules.auto_assign {
            if let Some(idx) = self.pick_staff(escalation.urgency, &escalation) {
                let member = &mut self.staff[idx];
                member.current_load += 1;
                escalation.assignment = Some(crate::escalation::Assignment {
                    assigned_to: member.id.clone(),
                    assigned_at: now,
                    assigned_by: "auto_router".to_string(),
                    estimated_resolution_minutes: member.avg_resolution_minutes,
                });
                info!(
                    escalation_id = %escalation.id,
                    staff_id = %member.id,
                    reason = ?escalation.reason,
                    "Escalation assigned"
                );
            } else {
                warn!(
                    escalation_id = %escalation.id,
                    reason = ?escalation.reason,
                    "No eligible staff, escalation queued unassigned"
                );
            }
        }

        self.escalations.push(escalation);
        self.escalations.last().unwrap()
    }

    /// Stamp a terminal resolution and release the assignee's load slot
    pub fn resolve(
        &mut self,
        escalation_id: &str,
        resolution: Resolution,
    ) -> EscalationResult<()> {
        let escalation = self
            .escalations
            .iter_mut()
            .find(|e| e.id == escalation_id)
            .ok_or_else(|| EscalationError::EscalationNotFound(escalation_id.to_string()))?;

        if escalation.is_resolved() {
            return Err(EscalationError::AlreadyResolved(escalation_id.to_string()));
        }

        let assignee = escalation
            .assignment
            .as_ref()
            .map(|a| a.assigned_to.clone());
        escalation.resolution = Some(resolution);
        info!(escalation_id = %escalation_id, "Escalation resolved");

        if let Some(staff_id) = assignee {
            if let Some(member) = self.staff.iter_mut().find(|s| s.id == staff_id) {
                member.current_load = member.current_load.saturating_sub(1);
            }
        }

        Ok(())
    }

    /// Look up an escalation by id
    pub fn escalation(&self, escalation_id: &str) -> Option<&StaffEscalation> {
        self.escalations.iter().find(|e| e.id == escalation_id)
    }

    /// Open escalations with no assignee, in creation order
    pub fn queue(&self) -> Vec<&StaffEscalation> {
        self.escalations
            .iter()
            .filter(|e| e.assignment.is_none() && !e.is_resolved())
            .collect()
    }

    /// Open escalations assigned to one staff member
    pub fn assigned_to(&self, staff_id: &str) -> Vec<&StaffEscalation> {
        self.escalations
            .iter()
            .filter(|e| {
                !e.is_resolved()
                    && e.assignment
                        .as_ref()
                        .is_some_and(|a| a.assigned_to == staff_id)
            })
            .collect()
    }

    /// Index of the best-scoring eligible staff member, if any
    fn pick_staff(&self, urgency: Urgency, escalation: &StaffEscalation) -> Option<usize> {
        let relevant = escalation.reason.relevant_expertise();
        let mut best: Option<(usize, f64)> = None;

        for (idx, member) in self.staff.iter().enumerate() {
            if member.status != StaffStatus::Available
                || member.current_load >= self.rules.max_cases_per_staff
            {
                continue;
            }

            let score = self.score_staff(member, urgency, relevant);
            // strict > keeps ties on the earliest roster entry
            match best {
                Some((_, s)) if score <= s => {}
                _ => best = Some((idx, score)),
            }
        }

        best.map(|(idx, _)| idx)
    }

    fn score_staff(&self, member: &StaffMember, urgency: Urgency, relevant: &[&str]) -> f64 {
        let mut score = 0.0;

        if self.rules.load_balancing {
            let spare = self.rules.max_cases_per_staff.saturating_sub(member.current_load);
            score += spare as f64 * self.rules.load_weight;
        }

        if self.rules.urgency_priority {
            score += urgency.rank() as f64 * self.rules.urgency_weight;
        }

        if self.rules.expertise_matching {
            let matches = member
                .expertise
                .iter()
                .filter(|tag| relevant.contains(&tag.as_str()))
                .count();
            score += matches as f64 * self.rules.expertise_weight;
        }

        score += member.satisfaction_score * self.rules.satisfaction_weight;
        score += (60.0 - member.avg_resolution_minutes.min(60.0)) * self.rules.speed_weight;

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escalation::{
        AssessmentContext, EscalationReason, ResolutionAction, UserContext,
    };
    use crate::staff::StaffRole;

    fn request(reason: EscalationReason, urgency: Urgency) -> EscalationRequest {
        EscalationRequest {
            user_id: "user-1".to_string(),
            case_id: "CASE-001".to_string(),
            reason,
            urgency,
            assessment: AssessmentContext {
                confidence: 55.0,
                risk_score: 72.0,
                decision: "manual_review".to_string(),
                key_factors: vec!["low document quality".to_string()],
                uncertainty_areas: vec!["identity".to_string()],
            },
            user_context: UserContext {
                current_step: "identity".to_string(),
                progress_pct: 40,
                time_spent_minutes: 12,
                prior_attempts: 1,
                sentiment: "patient".to_string(),
            },
        }
    }

    fn analyst(id: &str, load: u32) -> StaffMember {
        let mut member = StaffMember::new(
            id,
            id,
            format!("{id}@example.com"),
            StaffRole::FraudAnalyst,
            vec!["fraud_detection".to_string(), "aml_compliance".to_string()],
        );
        member.current_load = load;
        member
    }

    #[test]
    fn test_lower_load_wins_with_equal_expertise() {
        let mut router = EscalationRouter::new(AssignmentRules::default());
        router.register_staff(analyst("busy-analyst", 4));
        router.register_staff(analyst("free-analyst", 2));

        let escalation =
            router.escalate(request(EscalationReason::HighRisk, Urgency::High), Utc::now());

        let assignment = escalation.assignment.as_ref().unwrap();
        assert_eq!(assignment.assigned_to, "free-analyst");
    }

    #[test]
    fn test_expertise_match_beats_spare_capacity() {
        let mut router = EscalationRouter::new(AssignmentRules::default());
        let generalist = StaffMember::new(
            "generalist",
            "Generalist",
            "g@example.com",
            StaffRole::SupportAgent,
            vec!["general_support".to_string()],
        );
        router.register_staff(generalist);
        // two matching tags = 30 points, outweighing 2 spare-capacity slots
        router.register_staff(analyst("specialist", 2));

        let escalation =
            router.escalate(request(EscalationReason::HighRisk, Urgency::High), Utc::now());

        assert_eq!(
            escalation.assignment.as_ref().unwrap().assigned_to,
            "specialist"
        );
    }

    #[test]
    fn test_no_available_staff_queues_unassigned() {
        let mut router = EscalationRouter::new(AssignmentRules::default());
        let mut member = analyst("analyst", 0);
        member.status = StaffStatus::Busy;
        router.register_staff(member);

        let id = router
            .escalate(request(EscalationReason::HighRisk, Urgency::Critical), Utc::now())
            .id
            .clone();

        let escalation = router.escalation(&id).unwrap();
        assert!(escalation.assignment.is_none());
        assert_eq!(router.queue().len(), 1);
    }

    #[test]
    fn test_full_load_is_ineligible() {
        let mut router = EscalationRouter::new(AssignmentRules::default());
        router.register_staff(analyst("maxed", 5));

        let escalation =
            router.escalate(request(EscalationReason::HighRisk, Urgency::Low), Utc::now());

        assert!(escalation.assignment.is_none());
    }

    #[test]
    fn test_assignment_increments_load() {
        let mut router = EscalationRouter::new(AssignmentRules::default());
        router.register_staff(analyst("analyst", 0));

        for _ in 0..5 {
            router.escalate(request(EscalationReason::HighRisk, Urgency::Medium), Utc::now());
        }
        assert_eq!(router.staff_member("analyst").unwrap().current_load, 5);

        // sixth escalation finds nobody eligible
        let escalation =
            router.escalate(request(EscalationReason::HighRisk, Urgency::Medium), Utc::now());
        assert!(escalation.assignment.is_none());
    }

    #[test]
    fn test_resolve_releases_load_and_is_terminal() {
        let mut router = EscalationRouter::new(AssignmentRules::default());
        router.register_staff(analyst("analyst", 0));

        let id = router
            .escalate(request(EscalationReason::HighRisk, Urgency::High), Utc::now())
            .id
            .clone();
        assert_eq!(router.staff_member("analyst").unwrap().current_load, 1);

        let resolution = Resolution {
            resolved_by: "analyst".to_string(),
            resolved_at: Utc::now(),
            action: ResolutionAction::Approve,
            reasoning: "identity verified manually".to_string(),
            follow_up_required: false,
        };
        router.resolve(&id, resolution.clone()).unwrap();
        assert_eq!(router.staff_member("analyst").unwrap().current_load, 0);

        let err = router.resolve(&id, resolution).unwrap_err();
        assert!(matches!(err, EscalationError::AlreadyResolved(_)));
    }

    #[test]
    fn test_auto_assign_disabled() {
        let rules = AssignmentRules {
            auto_assign: false,
            ..AssignmentRules::default()
        };
        let mut router = EscalationRouter::new(rules);
        router.register_staff(analyst("analyst", 0));

        let escalation =
            router.escalate(request(EscalationReason::HighRisk, Urgency::High), Utc::now());

        assert!(escalation.assignment.is_none());
        assert_eq!(router.staff_member("analyst").unwrap().current_load, 0);
    }

    #[test]
    fn test_tie_goes_to_first_registered() {
        let mut router = EscalationRouter::new(AssignmentRules::default());
        router.register_staff(analyst("first", 2));
        router.register_staff(analyst("second", 2));

        let escalation =
            router.escalate(request(EscalationReason::HighRisk, Urgency::High), Utc::now());

        assert_eq!(escalation.assignment.as_ref().unwrap().assigned_to, "first");
    }
}
