mod helpers;

mod guard;
mod recovery;
mod session_flows;
