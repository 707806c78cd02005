/// Embed builders shared by paginated commands.
pub mod embed;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Paginated-message controller: actions, layout, navigator and sessions.
pub mod pagination;
