//! # Heuristic Advisor
//!
//! The deterministic, offline implementation of the advisory traits.
//! Grades risk and assembles summaries purely from the snapshot's
//! exception states, completion progress, and document presence. Used
//! whenever no external text-generation service is configured, and as
//! the fixed point of reference in tests.

use hpl_core::Message;
use hpl_lifecycle::{MilestoneStage, MilestoneStatus, ShipmentSnapshot, ShipmentStatus};

use crate::risk::{AdvisoryError, RiskAnalyst, RiskAssessment, RiskLevel};
use crate::summary::{ShipmentSummary, Summarizer};

/// Deterministic advisory implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAdvisor;

impl HeuristicAdvisor {
    fn reason_of(milestone_details: Option<&str>) -> &str {
        milestone_details.unwrap_or("no reason recorded")
    }

    /// Whether destination customs clearance is still ahead with no
    /// documents attached.
    fn customs_documentation_gap(snapshot: &ShipmentSnapshot) -> bool {
        snapshot
            .milestones
            .iter()
            .find(|m| m.stage == MilestoneStage::CustomsClearanceDestination)
            .is_some_and(|m| m.status != MilestoneStatus::Completed && m.document_count == 0)
    }

    fn completed_count(snapshot: &ShipmentSnapshot) -> usize {
        snapshot
            .milestones
            .iter()
            .filter(|m| m.status == MilestoneStatus::Completed)
            .count()
    }
}

impl RiskAnalyst for HeuristicAdvisor {
    fn assess(&self, snapshot: &ShipmentSnapshot) -> Result<RiskAssessment, AdvisoryError> {
        match snapshot.status {
            ShipmentStatus::Cancelled => {
                return Ok(RiskAssessment {
                    risk_level: RiskLevel::Low,
                    analysis_points: vec![
                        "Shipment is cancelled; no further transit risk.".to_string()
                    ],
                });
            }
            ShipmentStatus::Delivered => {
                return Ok(RiskAssessment {
                    risk_level: RiskLevel::Low,
                    analysis_points: vec!["Shipment has been delivered.".to_string()],
                });
            }
            _ => {}
        }

        let mut points = Vec::new();
        let mut delayed = false;
        let mut needs_action = false;
        for milestone in snapshot.exceptions() {
            let reason = Self::reason_of(milestone.details.as_deref());
            match milestone.status {
                MilestoneStatus::Delayed => {
                    delayed = true;
                    points.push(format!("{} is stalled: {reason}", milestone.stage.label()));
                }
                MilestoneStatus::RequiresAction => {
                    needs_action = true;
                    points.push(format!(
                        "{} needs intervention: {reason}",
                        milestone.stage.label()
                    ));
                }
                _ => {}
            }
        }

        let documentation_gap = Self::customs_documentation_gap(snapshot);
        if documentation_gap {
            points.push(
                "No documents attached ahead of destination customs clearance.".to_string(),
            );
        }

        let risk_level = if delayed {
            RiskLevel::High
        } else if needs_action || documentation_gap {
            RiskLevel::Medium
        } else {
            points.push("Transit proceeding as planned.".to_string());
            RiskLevel::Low
        };

        Ok(RiskAssessment {
            risk_level,
            analysis_points: points,
        })
    }
}

impl Summarizer for HeuristicAdvisor {
    fn summarize_shipment(
        &self,
        snapshot: &ShipmentSnapshot,
    ) -> Result<ShipmentSummary, AdvisoryError> {
        let total = snapshot.milestones.len();
        let completed = Self::completed_count(snapshot);

        let summary = match snapshot.status {
            ShipmentStatus::Delivered => "Shipment has been delivered.".to_string(),
            ShipmentStatus::Cancelled => format!(
                "Shipment was cancelled after {completed} of {total} milestones completed."
            ),
            ShipmentStatus::Delayed => {
                let stage = snapshot
                    .exceptions()
                    .find(|m| m.status == MilestoneStatus::Delayed)
                    .map(|m| m.stage.label())
                    .unwrap_or("an unknown stage");
                format!("Shipment is delayed at {stage}.")
            }
            ShipmentStatus::RequiresAction => {
                let stage = snapshot
                    .exceptions()
                    .find(|m| m.status == MilestoneStatus::RequiresAction)
                    .map(|m| m.stage.label())
                    .unwrap_or("an unknown stage");
                format!("Shipment needs intervention at {stage}.")
            }
            ShipmentStatus::InTransit => {
                let next = snapshot
                    .milestones
                    .iter()
                    .find(|m| {
                        matches!(
                            m.status,
                            MilestoneStatus::Pending | MilestoneStatus::InProgress
                        )
                    })
                    .map(|m| m.stage.label())
                    .unwrap_or("final delivery");
                format!("Shipment is in transit; next stage: {next}.")
            }
            ShipmentStatus::Pending => {
                "Shipment is booked and awaiting origin handling.".to_string()
            }
        };

        let mut highlights = vec![format!("{completed} of {total} milestones completed")];
        for milestone in snapshot.exceptions() {
            highlights.push(format!(
                "{}: {}",
                milestone.stage.label(),
                Self::reason_of(milestone.details.as_deref())
            ));
        }

        Ok(ShipmentSummary {
            summary,
            highlights,
        })
    }

    fn summarize_chat(&self, messages: &[Message]) -> Result<String, AdvisoryError> {
        if messages.is_empty() {
            return Ok("No messages to summarize.".to_string());
        }

        let mut participants: Vec<&str> = messages.iter().map(|m| m.sender.name.as_str()).collect();
        participants.sort_unstable();
        participants.dedup();

        // Slice indexing is safe: the empty case returned above.
        let latest = &messages[messages.len() - 1];
        Ok(format!(
            "{} messages from {} participants; latest from {} ({}): {}",
            messages.len(),
            participants.len(),
            latest.sender.name,
            latest.sender.role,
            latest.text
        ))
    }
}
