//! Maven interop: the argument vectors handed to `mvn install:install-file`
//! and `mvn deploy:deploy-file`, packaging coercion for war/jar artifacts,
//! and the standard repository layout used when reporting deployments.

pub mod publish;
pub mod repository;
