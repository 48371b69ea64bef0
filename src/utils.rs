mod message_id_counter;
pub use message_id_counter::MessageIdCounter;
