//! API endpoint implementations, grouped by resource.

mod app;
mod blocklists;
mod campaigns;
mod channel_types;
mod channels;
mod commands;
mod devices;
mod imports;
mod messages;
mod moderation;
mod permissions;
mod push_providers;
mod reminders;
mod segments;
mod tasks;
mod users;

pub use app::AppApi;
pub use blocklists::BlocklistsApi;
pub use campaigns::CampaignsApi;
pub use channel_types::ChannelTypesApi;
pub use channels::ChannelsApi;
pub use commands::CommandsApi;
pub use devices::DevicesApi;
pub use imports::ImportsApi;
pub use messages::MessagesApi;
pub use moderation::ModerationApi;
pub use permissions::PermissionsApi;
pub use push_providers::PushProvidersApi;
pub use reminders::RemindersApi;
pub use segments::SegmentsApi;
pub use tasks::TasksApi;
pub use users::UsersApi;
