//! `prople-agency-core` contains the business logic of an agent application that is hosted
//! by a remote `SSI (Self Sovereign Identity)` agency.
//!
//! The agency itself runs all `DIDComm` protocols (connection exchange, credential issuance,
//! proof presentation and basic messaging). This crate only reacts to the agency notifications
//! and decides which protocol should be started next. All transports are defined as traits,
//! the concrete implementations live at `prople-agency-rpc`.
pub mod agency;
