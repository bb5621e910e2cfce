use alloc::vec::Vec;
use core::fmt::Debug;

use motelink_api::{Command, Frame, HardwareId, NodeAddress};

use crate::Error;

/// Boundary to the underlying network stack.
///
/// Joining, addressing, retransmission and security all live below this
/// trait; the protocol core only asks whether the network is up, who the
/// local node is, and whether one frame was accepted for delivery. `send`
/// resolves to an immediate accept/reject status, never an ack-wait.
pub trait Radio {
    type Error: Debug;

    /// Whether the node currently holds network membership.
    fn is_up(&self) -> bool;

    /// Short address assigned to this node by the stack.
    fn node_address(&self) -> NodeAddress;

    /// Hardware identifier of the local radio.
    fn hardware_id(&self) -> HardwareId;

    /// Queues one frame for delivery to `destination`.
    async fn send(&mut self, destination: NodeAddress, frame: &[u8]) -> Result<(), Self::Error>;
}

/// Encodes and transmits one command frame stamped with the local identity.
///
/// A rejected send is logged with the stack's own error and mapped to
/// [`Error::SendFailed`].
pub(crate) async fn send_command<R: Radio>(
    radio: &mut R,
    destination: NodeAddress,
    command: Command,
    payload: Vec<u8>,
) -> Result<(), Error> {
    let frame = Frame::with_payload(
        command,
        radio.hardware_id(),
        radio.node_address(),
        payload,
    );
    let bytes = frame.encode()?;

    if let Err(e) = radio.send(destination, &bytes).await {
        log::warn!("TX: {} to {} rejected: {:?}", command.name(), destination, e);
        return Err(Error::SendFailed);
    }

    Ok(())
}
