mod conversation;

pub use conversation::{ConversationPipeline, PipelineError, TurnReply};
