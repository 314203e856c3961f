//! 编译模块：将签名编译为可执行的匹配模式
pub mod compiler;
pub mod pattern;

pub use self::compiler::SignatureCompiler;
pub use self::pattern::{CompiledSignature, MatchInput, Matcher, SignatureTable};
