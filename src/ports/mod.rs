/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports are the interfaces the analysis core uses to reach the
/// file system, external processes, package manager plugins and the console.
pub mod outbound;
