/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports: the console,
/// the file system, external processes and the built-in package managers.
pub mod outbound;
