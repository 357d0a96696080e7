pub mod inmemory;

pub use inmemory::InMemoryPresenceRegistry;
