//! CLI commands

use std::collections::HashMap;
use std::path::Path;

use onboard_core::{Clock, ProgressData, SessionState, SessionStore};
use onboard_escalation::{
    AssessmentContext, EscalationReason, EscalationRequest, EscalationSummary, StaffMember,
    StaffRole, Urgency, UserContext,
};
use onboard_learning::{
    AiAssessment, CaseSeverity, FraudType, ReviewOutcome, ReviewerDecision,
};
use onboard_risk::RiskFactors;

use crate::context::AppContext;

/// Score a session from a JSON factors file and show the adapted flow
pub fn score(ctx: &mut AppContext, factors_path: &Path) -> Result<(), anyhow::Error> {
    let content = std::fs::read_to_string(factors_path)?;
    let factors: RiskFactors = serde_json::from_str(&content)?;

    let score = ctx.engine.calculate_at(&factors, ctx.clock.now());
    println!(
        "Risk score: {} ({:?}, confidence {}%)",
        score.overall, score.category, score.confidence
    );

    let flow = ctx.flow.adapt(&score, &factors);
    println!("\nAdapted flow:");
    for step in &flow.steps {
        println!(
            "  {:<20} {:>4}s {}",
            step.name,
            step.estimated_secs,
            if step.required { "" } else { "(optional)" }
        );
    }
    if !flow.skipped.is_empty() {
        println!("Skipped: {}", flow.skipped.join(", "));
    }
    if !flow.added.is_empty() {
        println!("Added: {}", flow.added.join(", "));
    }
    println!("Time reduction: {}%", flow.time_reduction_pct);

    Ok(())
}

/// Simulate a session dropping off and the recovery pipeline running
pub async fn simulate_drop_off(ctx: &mut AppContext, user_id: &str) -> Result<(), anyhow::Error> {
    let mut state = SessionState::default();
    state.progress = ProgressData {
        completed_steps: vec!["identity".to_string()],
        current_step: "biometrics".to_string(),
        current_step_progress: 55,
        form_data: HashMap::from([("first_name".to_string(), "Alex".to_string())]),
        uploaded_files: vec![],
    };
    ctx.store.put(user_id, state);
    ctx.monitor.register_session(user_id, ctx.clock.now());
    println!("Session registered for {}", user_id);

    // Sweep at the configured cadence until the session goes quiet long
    // enough to drop off
    let interval = ctx.monitor.sweep_interval();
    let mut events = Vec::new();
    while events.is_empty() {
        ctx.clock.advance(interval);
        events = ctx.monitor.sweep(ctx.clock.now());
    }
    println!("Sweep found {} drop-off(s)", events.len());

    for event in &events {
        println!(
            "  {} dropped on \"{}\" ({:?})",
            event.user_id, event.dropped_step, event.reason
        );
        ctx.dispatcher.handle_drop_off(event, ctx.clock.now());
    }

    // Drive the scheduler through send and delivery confirmation
    while ctx.dispatcher.pending_tasks() > 0 {
        let due = ctx
            .dispatcher
            .next_due()
            .expect("pending tasks have a due time");
        ctx.clock.set(due);
        ctx.dispatcher.run_due(ctx.clock.now()).await;
    }

    for event in &events {
        for action in ctx.dispatcher.actions_for_event(&event.id) {
            println!("  action {} -> {:?}", action.channel, action.status);
        }
    }

    Ok(())
}

/// Open a fraud case, submit a reviewer decision, and show the feedback
pub fn review(
    ctx: &mut AppContext,
    user_id: &str,
    risk_score: f64,
    outcome: &str,
    reviewer: &str,
) -> Result<(), anyhow::Error> {
    let outcome = parse_outcome(outcome)?;
    let now = ctx.clock.now();

    let assessment = AiAssessment {
        risk_score,
        confidence: 75.0,
        triggered_rules: vec!["VELOCITY_CHECK".to_string()],
        biometric_score: 62.0,
        document_score: 58.0,
        behavioral_anomalies: vec!["vpn_usage".to_string()],
    };
    let case_id = ctx.learning.open_case(
        user_id,
        FraudType::IdentityFraud,
        CaseSeverity::High,
        assessment,
        now,
    )?;
    println!("Opened case {} (AI score {})", case_id, risk_score);

    let decision = ReviewerDecision {
        reviewer_id: reviewer.to_string(),
        reviewer_name: reviewer.to_string(),
        outcome,
        confidence: 90.0,
        reasoning: "manual review via CLI".to_string(),
        decided_at: now,
    };
    let feedback_id = ctx.learning.submit_review(&case_id, decision, now)?;

    match feedback_id {
        Some(id) => {
            let feedback = ctx.learning.feedback(&id).expect("feedback just generated");
            println!(
                "Feedback {} (misprediction: {})",
                id, feedback.misprediction
            );
            for change in &feedback.model_updates.changes {
                println!("  - {}", change);
            }
            println!(
                "Expected accuracy improvement: {:.1}",
                feedback.model_updates.expected_accuracy_improvement
            );
        }
        None => println!("No feedback generated for this outcome"),
    }

    if let Some(metrics) = ctx.learning.latest_metrics() {
        println!(
            "Model accuracy: {:.1}% over {} case(s) ({:?})",
            metrics.accuracy, metrics.total_cases, metrics.trend
        );
    }

    Ok(())
}

/// Escalate a case to a sample staff roster and show the handoff summary
pub fn escalate(
    ctx: &mut AppContext,
    user_id: &str,
    reason: &str,
    urgency: &str,
) -> Result<(), anyhow::Error> {
    // The CLI holds no durable roster; seed a representative one per run
    ctx.router.register_staff(StaffMember::new(
        "STAFF-001",
        "Sarah Chen",
        "sarah.chen@example.com",
        StaffRole::ComplianceOfficer,
        vec![
            "identity_verification".to_string(),
            "aml_compliance".to_string(),
        ],
    ));
    ctx.router.register_staff(StaffMember::new(
        "STAFF-002",
        "Mike Rodriguez",
        "mike.rodriguez@example.com",
        StaffRole::FraudAnalyst,
        vec![
            "fraud_detection".to_string(),
            "risk_assessment".to_string(),
            "biometric_analysis".to_string(),
        ],
    ));
    ctx.router.register_staff(StaffMember::new(
        "STAFF-003",
        "Emma Thompson",
        "emma.thompson@example.com",
        StaffRole::SupportAgent,
        vec![
            "general_support".to_string(),
            "technical_support".to_string(),
        ],
    ));

    let request = EscalationRequest {
        user_id: user_id.to_string(),
        case_id: format!("CASE-{}", &uuid::Uuid::new_v4().to_string()[..8]),
        reason: parse_reason(reason)?,
        urgency: parse_urgency(urgency)?,
        assessment: AssessmentContext {
            confidence: 55.0,
            risk_score: 72.0,
            decision: "manual_review".to_string(),
            key_factors: vec!["low document quality".to_string()],
            uncertainty_areas: vec!["identity verification".to_string()],
        },
        user_context: UserContext {
            current_step: "identity".to_string(),
            progress_pct: 40,
            time_spent_minutes: 12,
            prior_attempts: 1,
            sentiment: "patient".to_string(),
        },
    };

    let escalation = ctx.router.escalate(request, ctx.clock.now()).clone();
    match &escalation.assignment {
        Some(assignment) => println!(
            "Escalation {} assigned to {} (est. {:.0} min)",
            escalation.id, assignment.assigned_to, assignment.estimated_resolution_minutes
        ),
        None => println!(
            "Escalation {} queued unassigned ({} in queue)",
            escalation.id,
            ctx.router.queue().len()
        ),
    }

    let summary = EscalationSummary::generate(&escalation);
    println!("\n{}", summary.headline);
    println!("{}", summary.decision_path);
    println!("\nSuggested actions:");
    for action in &summary.quick_actions {
        println!("  - {} (~{} min)", action.label, action.estimated_minutes);
    }

    Ok(())
}

fn parse_outcome(value: &str) -> Result<ReviewOutcome, anyhow::Error> {
    match value {
        "confirm_fraud" => Ok(ReviewOutcome::ConfirmFraud),
        "false_positive" => Ok(ReviewOutcome::FalsePositive),
        "needs_investigation" => Ok(ReviewOutcome::NeedsInvestigation),
        other => anyhow::bail!(
            "unknown outcome '{}' (expected confirm_fraud, false_positive, or needs_investigation)",
            other
        ),
    }
}

fn parse_reason(value: &str) -> Result<EscalationReason, anyhow::Error> {
    match value {
        "low_confidence" => Ok(EscalationReason::LowConfidence),
        "high_risk" => Ok(EscalationReason::HighRisk),
        "user_request" => Ok(EscalationReason::UserRequest),
        "system_error" => Ok(EscalationReason::SystemError),
        "complex_case" => Ok(EscalationReason::ComplexCase),
        other => anyhow::bail!("unknown escalation reason '{}'", other),
    }
}

fn parse_urgency(value: &str) -> Result<Urgency, anyhow::Error> {
    match value {
        "low" => Ok(Urgency::Low),
        "medium" => Ok(Urgency::Medium),
        "high" => Ok(Urgency::High),
        "critical" => Ok(Urgency::Critical),
        other => anyhow::bail!("unknown urgency '{}'", other),
    }
}
