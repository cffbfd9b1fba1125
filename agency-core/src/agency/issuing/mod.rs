//! `issuing` prepares everything needed before a credential can be offered
//!
//! A credential definition is created only once. Its id is stored through a
//! [`types::CredDefRepoBuilder`] and reused on the next start.
pub mod types;
pub mod usecase;
