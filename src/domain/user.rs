//! Roles assigned to staff accounts.

wire_enum! {
    /// Access level of a user account.
    #[derive(Default)]
    pub enum UserRole {
        /// Owner or administrator with full access.
        Admin => "admin",
        /// Office staff scheduling and invoicing work.
        Dispatcher => "dispatcher",
        /// Field engineer working assigned jobs.
        #[default]
        Engineer => "engineer",
    }
}
