mod cred_def;
pub use cred_def::CredDefFileRepo;
