use serde_json::Value;
use tracing::warn;

use crate::error::ShapeError;
use crate::practicum::{StatusCode, WorkItemStatus};

/// What a validated cycle should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The API returned no homeworks; nothing changes.
    Empty,
    /// The newest homework moved to a new status; send `message`, then advance.
    Notify {
        item: WorkItemStatus,
        message: String,
    },
    /// Same status as last time; advance without sending anything.
    Unchanged { item: WorkItemStatus },
}

/// In-memory tracking state: the last observed status and the `from_date`
/// watermark for the next request.
#[derive(Debug, Clone)]
pub struct StatusTracker {
    last_seen: Option<StatusCode>,
    watermark: i64,
}

impl StatusTracker {
    pub fn new(watermark: i64) -> Self {
        Self {
            last_seen: None,
            watermark,
        }
    }

    pub fn watermark(&self) -> i64 {
        self.watermark
    }

    pub fn last_seen(&self) -> Option<StatusCode> {
        self.last_seen
    }

    /// Compare the newest homework against the last seen status.
    ///
    /// Only `homeworks[0]` is inspected. Does not mutate the tracker; call
    /// [`advance`](Self::advance) once the decision has been carried out.
    pub fn decide(&self, homeworks: &[Value]) -> Result<Decision, ShapeError> {
        let Some(newest) = homeworks.first() else {
            return Ok(Decision::Empty);
        };
        let item = WorkItemStatus::from_value(newest)?;

        if self.last_seen == Some(item.status) {
            Ok(Decision::Unchanged { item })
        } else {
            let message = item.change_message();
            Ok(Decision::Notify { item, message })
        }
    }

    /// Record a successfully handled status and move the watermark.
    ///
    /// The watermark never moves backwards; an older `current_date` is
    /// logged and ignored.
    pub fn advance(&mut self, status: StatusCode, current_date: i64) {
        self.last_seen = Some(status);
        if current_date < self.watermark {
            warn!(
                current_date,
                watermark = self.watermark,
                "server current_date is behind the watermark, keeping watermark"
            );
            return;
        }
        self.watermark = current_date;
    }
}
