//! DNS Message Builder
//!
//! Constructs upstream query messages in wire format using `hickory-proto`.

use dnsbox_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query (RD set, random ID, single question) and
    /// return the ID alongside the serialized bytes for response matching.
    pub fn build_query(
        name: &Name,
        record_type: RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let id = fastrand::u16(..);

        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true);
        message.add_query(Query::query(name.clone(), record_type));

        let bytes = message.to_vec().map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to serialize DNS query: {}", e))
        })?;

        Ok((id, bytes))
    }
}
