// SPDX-License-Identifier: MPL-2.0
use iced_atelier::app::{self, Flags};
use pico_args;

fn main() -> iced::Result {
    env_logger::init();

    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        backend: args.opt_value_from_str("--backend").unwrap(),
        gallery: args.opt_value_from_str("--gallery").unwrap(),
        image: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
    };

    app::run(flags)
}
