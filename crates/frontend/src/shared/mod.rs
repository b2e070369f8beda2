pub mod api_utils;
pub mod autocomplete;
pub mod broadcast_cache;
pub mod cascade;
pub mod confirm;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod modal_stack;
pub mod notifications;
pub mod persistence;
pub mod selection_store;
