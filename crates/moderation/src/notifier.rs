//! Outgoing warning messages.

use tracing::trace;
use vigil_shares::PeerName;

use crate::traits::MessagingService;

/// Send a multi-line notice to a peer, one outgoing message per line, in
/// order. A wholly blank message sends nothing. Fire-and-forget: delivery
/// failures are the messaging service's concern, and there is no retry.
pub fn send_notice<M: MessagingService>(
    messaging: &M,
    peer: &PeerName,
    message: &str,
    open_ui: bool,
) {
    if message.trim().is_empty() {
        return;
    }

    for line in message.lines() {
        messaging.send_line(peer, line, open_ui);
    }
    trace!(%peer, lines = message.lines().count(), "sent ban notice");
}
