pub struct RequestFields;

impl RequestFields {
    pub const REQUESTER: &'static str = "requester";
    pub const WORKSPACE_ID: &'static str = "workspace_id";
    pub const USER_ID: &'static str = "user_id";
    pub const SETTINGS: &'static str = "settings";
}
