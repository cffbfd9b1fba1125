mod agency;
pub use agency::Agency;

mod app;
pub use app::App;

mod dispatcher;
pub use dispatcher::Dispatcher;

mod email;
pub use email::Email;

mod issuing;
pub use issuing::Issuing;

mod config;
pub use config::Config;

mod parser;
pub use parser::Parser;
