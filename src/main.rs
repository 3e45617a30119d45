// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    missing_doc_code_examples,
    private_doc_tests,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod api;
mod controller;
mod document;
mod error;
mod metadata;
mod model;
mod render;
mod session;
mod shell;
mod storage;
#[cfg(test)]
mod testing;
mod ui;
mod view;

use std::process;

use clap::Parser;
use error::Result;
use log::{error, info, warn};
use storage::IsPersistent as _;
use url::Url;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The base URL of the turma API.
    #[arg(long, env = "TURMAS_URL", default_value = "http://localhost:3000", value_parser = Url::parse)]
    url: Url,

    /// Keep the session in memory only. It is forgotten when the program
    /// exits.
    #[arg(long)]
    no_persist: bool,
}

fn get_session_storage(args: &Args) -> Box<dyn storage::Storage> {
    if !args.no_persist {
        if let Some(file_storage) = storage::File::new(&args.url) {
            info!("Keeping the session in {}", file_storage.path().display());
            return Box::new(file_storage);
        }
    }

    Box::new(storage::Memory::new())
}

async fn run(args: Args) -> Result<()> {
    let storage = get_session_storage(&args);
    if !storage.is_persistent() {
        warn!("The session is kept in memory only and will be forgotten on exit");
    }

    let terminal = ui::Terminal;
    let api = api::HttpApi::new(args.url)?;
    let mut controller = controller::Controller::new(api, storage, terminal);
    controller.init().await?;

    shell::run(&mut controller, terminal).await
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("TURMAS_LOG", "warn")
        .write_style("TURMAS_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
