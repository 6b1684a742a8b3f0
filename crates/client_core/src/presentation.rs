//! Fixed presentation content with no behavioral contract: the scripted
//! assistant transcript and the scripted manager-approval notification.
//! Nothing here reacts to the workflow; surfaces render it verbatim
//! with input controls disabled.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSender {
    Agent,
    User,
}

impl ChatSender {
    pub fn display_name(self) -> &'static str {
        match self {
            ChatSender::Agent => "AccessHub AI Agent",
            ChatSender::User => "You",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: &'static str,
}

/// The canned conversation shown in the chat widget.
pub const SCRIPTED_TRANSCRIPT: &[ChatMessage] = &[
    ChatMessage {
        sender: ChatSender::Agent,
        text: "Hi, for what technology do you want me to find the requests for you?",
    },
    ChatMessage {
        sender: ChatSender::User,
        text: "Databricks",
    },
    ChatMessage {
        sender: ChatSender::Agent,
        text: "To use Databricks in your department, you will need access to the database - DB Access and Databricks - Databrick Access.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerNotification {
    pub manager_name: &'static str,
    pub requester_id: &'static str,
    pub requested_groups: &'static [&'static str],
    /// Entry singled out by the anomaly marker.
    pub flagged_group: &'static str,
    pub anomaly_note: &'static str,
}

/// The canned approval notification shown alongside the chat widget.
pub const MANAGER_NOTIFICATION: ManagerNotification = ManagerNotification {
    manager_name: "John Manager",
    requester_id: "G01234567",
    requested_groups: &["DB Access", "Databrick Access", "VS Code", "AWS CLI"],
    flagged_group: "AWS CLI",
    anomaly_note: "Potential anomaly detected: This request may not be appropriate for this user.",
};
