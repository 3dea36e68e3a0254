/// Delivery metadata reported by the mail provider after a successful send.
///
/// Both fields are provider-assigned and passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub message_id: String,
    pub response: String,
}
