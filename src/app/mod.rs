pub mod planner;
pub mod rpc;

pub use planner::MeetingPlanner;
pub use rpc::RpcHandler;
