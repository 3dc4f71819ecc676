mod object_media_store;
mod store_factory;

pub use object_media_store::ObjectMediaStore;
pub use store_factory::MediaStoreFactory;
