use serde::{Deserialize, Serialize};

use crate::domain::ActivityId;

/// Form field name the activity runner reads the selection from; each
/// selected activity is sent as one repeated `activity=<id>` pair.
pub const ACTIVITY_FIELD: &str = "activity";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub activities: Vec<ActivityId>,
}

impl RunRequest {
    pub fn new(activities: Vec<ActivityId>) -> Self {
        Self { activities }
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn form_pairs(&self) -> Vec<(&'static str, String)> {
        self.activities
            .iter()
            .map(|id| (ACTIVITY_FIELD, id.0.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_pairs_repeat_the_activity_field_in_request_order() {
        let request = RunRequest::new(vec![ActivityId(2), ActivityId(5), ActivityId(11)]);
        assert_eq!(
            request.form_pairs(),
            vec![
                ("activity", "2".to_string()),
                ("activity", "5".to_string()),
                ("activity", "11".to_string()),
            ]
        );
    }

    #[test]
    fn empty_request_produces_no_pairs() {
        let request = RunRequest::new(Vec::new());
        assert!(request.is_empty());
        assert!(request.form_pairs().is_empty());
    }
}
