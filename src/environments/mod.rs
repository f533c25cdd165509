pub mod java;

pub use java::{
    find_java, parse_constraint, CommandRunner, JavaInstaller, JavaResolver, JavaScanner,
    JavaValidator, SystemCommandRunner, VersionConstraint, VersionProbe, VersionRule,
};
