mod sendgrid;
pub use sendgrid::SendgridSender;
