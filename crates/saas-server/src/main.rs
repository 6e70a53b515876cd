// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SaaS API server binary.

use clap::{Parser, Subcommand};
use saas_server::{create_app_state, create_router, MemoryStore};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod version;

/// SaaS server - role-gated API for organizations and projects.
#[derive(Parser, Debug)]
#[command(name = "saas-server", about = "SaaS organizations API server", version)]
struct Args {
	/// Read configuration from this TOML file instead of /etc/saas/server.toml
	#[arg(long, env = "SAAS_SERVER_CONFIG")]
	config: Option<PathBuf>,

	/// Subcommands for saas-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => saas_server_config::load_config_with_file(path.clone())?,
		None => saas_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		environment = %config.auth.environment,
		identity_header = %config.auth.identity_header,
		"starting saas-server"
	);

	let store = Arc::new(MemoryStore::new());
	let state = create_app_state(store, config.auth.clone());

	let app = create_router(state).layer(
		CorsLayer::new()
			.allow_origin(Any)
			.allow_methods(Any)
			.allow_headers(Any),
	);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
