pub mod installer;
pub mod probe;
pub mod resolver;
pub mod scanner;
pub mod validator;
pub mod version_manager;

pub use installer::JavaInstaller;
pub use probe::{CommandRunner, SystemCommandRunner, VersionProbe};
pub use resolver::{find_java, JavaResolver};
pub use scanner::JavaScanner;
pub use validator::JavaValidator;
pub use version_manager::{parse_constraint, VersionConstraint, VersionRule};
