pub mod dns;

pub use dns::{
    evaluate_policy, reject_response, DispatchOutcome, HandleDnsPacketUseCase, PolicyOutcome,
};
