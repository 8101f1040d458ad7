// Cross-cutting prompt fragments owned by the client itself.
// Task prompts live next to the module that uses them.

/// System message sent with every completion request.
pub const ASSISTANT_SYSTEM: &str = "You are a helpful assistant.";
