pub use super::application_events::Entity as ApplicationEvents;
pub use super::application_events_view::Entity as ApplicationEventsView;
pub use super::livestock::Entity as Livestock;
pub use super::lots::Entity as Lots;
pub use super::products::Entity as Products;
