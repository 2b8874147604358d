mod evaluate_policy;
mod handle_dns_packet;

pub use evaluate_policy::{evaluate_policy, reject_response, PolicyOutcome};
pub use handle_dns_packet::{DispatchOutcome, HandleDnsPacketUseCase};
