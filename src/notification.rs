//! Notification System
//!
//! Toast messages for mutations and request failures, with history tracking.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Level of detail for notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Minimal: action + record + status icon
    Minimal,
    /// Detailed: action + record + duration
    #[default]
    Detailed,
    /// Verbose: all info including error details
    Verbose,
}

impl DetailLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Detailed => "detailed",
            Self::Verbose => "verbose",
        }
    }
}

/// Type of operation being performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Create,
    Update,
    Delete,
    /// A read that failed
    Fetch,
}

impl OperationType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::Fetch => "Fetch",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Create => "Created",
            Self::Update => "Updated",
            Self::Delete => "Deleted",
            Self::Fetch => "Fetched",
        }
    }

    pub fn present_participle(&self) -> &'static str {
        match self {
            Self::Create => "Creating",
            Self::Update => "Updating",
            Self::Delete => "Deleting",
            Self::Fetch => "Fetching",
        }
    }
}

/// Status of a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    /// Request sent, waiting for the server
    Pending,
    Success,
    /// Failed with a presentable message
    Error(String),
}

impl NotificationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Error(_))
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Pending => "◯",
            Self::Success => "✓",
            Self::Error(_) => "✗",
        }
    }
}

/// A single notification
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub operation_type: OperationType,
    /// Resource key, e.g. `product`
    pub resource_type: String,
    /// Record label or id; may be empty for new records
    pub subject: String,
    pub status: NotificationStatus,
    pub created_at: Instant,
    pub completed_at: Option<Instant>,
}

impl Notification {
    pub fn new(operation_type: OperationType, resource_type: String, subject: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            operation_type,
            resource_type,
            subject,
            status: NotificationStatus::Pending,
            created_at: Instant::now(),
            completed_at: None,
        }
    }

    pub fn set_success(&mut self) {
        self.status = NotificationStatus::Success;
        self.completed_at = Some(Instant::now());
    }

    pub fn set_error(&mut self, error: String) {
        self.status = NotificationStatus::Error(error);
        self.completed_at = Some(Instant::now());
    }

    /// Elapsed time, frozen once the request completes
    pub fn duration(&self) -> Duration {
        self.completed_at
            .unwrap_or_else(Instant::now)
            .duration_since(self.created_at)
    }

    pub fn duration_display(&self) -> String {
        let d = self.duration();
        if d.as_secs() < 1 {
            format!("{}ms", d.as_millis())
        } else if d.as_secs() < 60 {
            format!("{}s", d.as_secs())
        } else {
            format!("{}m{}s", d.as_secs() / 60, d.as_secs() % 60)
        }
    }

    fn target(&self) -> &str {
        if self.subject.is_empty() {
            &self.resource_type
        } else {
            &self.subject
        }
    }

    /// Format notification for toast display
    pub fn toast_message(&self, detail_level: DetailLevel) -> String {
        let icon = self.status.icon();
        let verb = match &self.status {
            NotificationStatus::Pending => self.operation_type.present_participle(),
            NotificationStatus::Success => self.operation_type.past_tense(),
            NotificationStatus::Error(_) => "Failed",
        };

        match detail_level {
            DetailLevel::Minimal => format!("{} {} {}", icon, verb, self.target()),
            DetailLevel::Detailed => {
                if let NotificationStatus::Error(ref err) = self.status {
                    format!("{} {} {}: {}", icon, verb, self.target(), err)
                } else if self.status.is_terminal() {
                    format!("{} {} {} ({})", icon, verb, self.target(), self.duration_display())
                } else {
                    format!("{} {} {}...", icon, verb, self.target())
                }
            }
            DetailLevel::Verbose => {
                let base = format!(
                    "{} {} {} {} [{}]",
                    icon,
                    verb,
                    self.operation_type.display_name().to_lowercase(),
                    self.target(),
                    self.resource_type
                );
                if let NotificationStatus::Error(ref err) = self.status {
                    format!("{} - {} ({})", base, err, self.duration_display())
                } else if self.status.is_terminal() {
                    format!("{} ({})", base, self.duration_display())
                } else {
                    format!("{}...", base)
                }
            }
        }
    }
}

/// Notification manager
#[derive(Debug)]
pub struct NotificationManager {
    /// All notifications (recent first)
    pub notifications: VecDeque<Notification>,
    /// Maximum notifications to keep in history
    pub max_history: usize,
    /// Toast display duration
    pub toast_duration: Duration,
    pub detail_level: DetailLevel,
    last_toast_time: Option<Instant>,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: VecDeque::new(),
            max_history: 50,
            toast_duration: Duration::from_secs(5),
            detail_level: DetailLevel::Detailed,
            last_toast_time: None,
        }
    }

    pub fn with_settings(detail_level: DetailLevel, max_history: usize) -> Self {
        Self {
            detail_level,
            max_history: max_history.max(1),
            ..Self::new()
        }
    }

    /// Create a pending notification for a request
    pub fn create_notification(
        &mut self,
        operation_type: OperationType,
        resource_type: &str,
        subject: &str,
    ) -> Uuid {
        let notification =
            Notification::new(operation_type, resource_type.to_string(), subject.to_string());
        let id = notification.id;
        self.notifications.push_front(notification);
        self.last_toast_time = Some(Instant::now());
        self.trim_history();
        id
    }

    pub fn mark_success(&mut self, id: Uuid) {
        if let Some(notif) = self.notifications.iter_mut().find(|n| n.id == id) {
            notif.set_success();
            self.last_toast_time = Some(Instant::now());
        }
    }

    pub fn mark_error(&mut self, id: Uuid, error: String) {
        if let Some(notif) = self.notifications.iter_mut().find(|n| n.id == id) {
            notif.set_error(error);
            self.last_toast_time = Some(Instant::now());
        }
    }

    /// Record a failed read in one step
    pub fn push_error(&mut self, resource_type: &str, subject: &str, error: String) -> Uuid {
        let id = self.create_notification(OperationType::Fetch, resource_type, subject);
        self.mark_error(id, error);
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    /// Get the most recent notification while its toast is visible
    pub fn current_toast(&self) -> Option<&Notification> {
        let last_time = self.last_toast_time?;
        if last_time.elapsed() > self.toast_duration {
            return None;
        }
        self.notifications.front()
    }

    /// Toast text of the current notification at the configured detail level
    pub fn current_toast_message(&self) -> Option<String> {
        self.current_toast()
            .map(|n| n.toast_message(self.detail_level))
    }

    pub fn in_progress_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.status == NotificationStatus::Pending)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|n| matches!(n.status, NotificationStatus::Error(_)))
            .count()
    }

    /// Trim history to max size
    fn trim_history(&mut self) {
        while self.notifications.len() > self.max_history {
            // Remove oldest completed notification
            if let Some(pos) = self.notifications.iter().rposition(|n| n.status.is_terminal()) {
                self.notifications.remove(pos);
            } else {
                self.notifications.pop_back();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_lifecycle() {
        let mut manager = NotificationManager::new();

        let id = manager.create_notification(OperationType::Create, "product", "Regulator");
        assert_eq!(manager.in_progress_count(), 1);
        assert_eq!(manager.get(id).unwrap().status, NotificationStatus::Pending);

        manager.mark_success(id);
        assert_eq!(manager.get(id).unwrap().status, NotificationStatus::Success);
        assert_eq!(manager.in_progress_count(), 0);
    }

    #[test]
    fn test_toast_message_formats() {
        let mut notif = Notification::new(OperationType::Update, "vehicle".into(), "MH12AB1234".into());

        let msg = notif.toast_message(DetailLevel::Minimal);
        assert!(msg.contains("Updating"));
        assert!(msg.contains("MH12AB1234"));

        notif.set_success();
        let msg = notif.toast_message(DetailLevel::Minimal);
        assert!(msg.contains("Updated"));
        assert!(msg.contains("✓"));

        notif.set_error("Number already exists (409)".into());
        let msg = notif.toast_message(DetailLevel::Verbose);
        assert!(msg.contains("[vehicle]"));
        assert!(msg.contains("Number already exists (409)"));
    }

    #[test]
    fn test_empty_subject_falls_back_to_resource() {
        let notif = Notification::new(OperationType::Create, "customer".into(), String::new());
        assert_eq!(notif.toast_message(DetailLevel::Minimal), "◯ Creating customer");
    }

    #[test]
    fn test_history_is_bounded() {
        let mut manager = NotificationManager::with_settings(DetailLevel::Minimal, 3);
        for i in 0..5 {
            manager.push_error("sale", &format!("s{}", i), "Server temporarily unavailable.".into());
        }
        assert_eq!(manager.notifications.len(), 3);
        assert_eq!(manager.error_count(), 3);
        assert_eq!(manager.notifications.front().unwrap().subject, "s4");
        assert!(manager.current_toast_message().unwrap().contains("Failed"));
    }
}
