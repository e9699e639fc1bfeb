//! # Assessment Agents
//!
//! An assessment agent is an external collaborator (a language-model
//! specialist, a human reviewer) asked to judge a control that has no
//! validator. It answers with one free-text line whose leading token is
//! `Comply`, `Partial` or `Gap`; anything else is ignored and the engine's
//! own decision stands.

use ssp_core::{Capability, ControlId, Decision};

/// The question put to an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentTask {
    /// Control under assessment.
    pub control_id: ControlId,
    /// Control description from the workbook.
    pub description: String,
    /// Category the control was routed to.
    pub capability: Capability,
}

impl AssessmentTask {
    /// Prompt text asking for a one-line verdict.
    pub fn prompt(&self) -> String {
        format!(
            "For {}: Read the description and decide Comply|Partial|Gap, \
             with ONE short rationale or remediation.\nDescription: {}\n\
             Return ONE line: Comply|Partial|Gap + brief rationale.",
            self.control_id, self.description
        )
    }
}

/// Judges controls without a validator.
pub trait AssessmentAgent {
    /// A one-line reply, or `None` when the agent is unavailable.
    fn assess(&self, task: &AssessmentTask) -> Option<String>;
}

/// Consult an agent and interpret its reply.
///
/// Returns `None` for an absent or unparseable reply.
pub fn consult(agent: &dyn AssessmentAgent, task: &AssessmentTask) -> Option<Decision> {
    let reply = agent.assess(task)?;
    let line = reply.lines().find(|l| !l.trim().is_empty())?;
    match Decision::from_reply(line) {
        Some(decision) => Some(decision),
        None => {
            tracing::warn!(
                control_id = %task.control_id,
                reply = %line,
                "agent reply has no leading status; ignored"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssp_core::Status;

    struct Canned(Option<&'static str>);

    impl AssessmentAgent for Canned {
        fn assess(&self, _: &AssessmentTask) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    fn task() -> AssessmentTask {
        AssessmentTask {
            control_id: ControlId::new("ISM-0421").unwrap(),
            description: "Passphrases are at least 14 characters.".into(),
            capability: Capability::Hardening,
        }
    }

    #[test]
    fn prompt_names_control_and_description() {
        let p = task().prompt();
        assert!(p.starts_with("For ISM-0421: "));
        assert!(p.contains("Description: Passphrases are at least 14 characters."));
    }

    #[test]
    fn leading_status_is_interpreted() {
        let d = consult(&Canned(Some("\n  Partial - length enforced for admins only\n")), &task())
            .unwrap();
        assert_eq!(d.status, Status::Partial);
        assert_eq!(d.comment, "Partial - length enforced for admins only");
    }

    #[test]
    fn absent_or_unparseable_reply_is_ignored() {
        assert!(consult(&Canned(None), &task()).is_none());
        assert!(consult(&Canned(Some("")), &task()).is_none());
        assert!(consult(&Canned(Some("I think it complies")), &task()).is_none());
    }
}
