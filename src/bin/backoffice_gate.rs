//!
//! backoffice gate CLI
//! -------------------
//! Evaluate an access request for a given actor the same way the dashboard
//! gate does, and print what would be rendered. Useful for checking role and
//! permission wiring of a screen without a browser.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use backoffice::config::EffectiveConfig;
use backoffice::gate::{explain, AccessGate, AccessRequest, Rendered};
use backoffice::identity::{ActorContext, Permission, Principal, Role};

#[derive(Parser)]
#[command(name = "backoffice_gate", about = "Evaluate back-office access gates from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide whether an actor may view a gated region.
    Check {
        /// Actor user id.
        #[arg(long, default_value = "cli")]
        user: String,
        /// Actor role (repeatable).
        #[arg(long = "role")]
        roles: Vec<String>,
        /// Actor permission (repeatable).
        #[arg(long = "permission")]
        permissions: Vec<String>,
        /// Add the permissions the role catalog derives from the actor's roles.
        #[arg(long)]
        catalog_defaults: bool,
        /// Treat the actor as not yet loaded.
        #[arg(long)]
        unloaded: bool,

        /// Role allowed to view the region (repeatable).
        #[arg(long = "allow-role")]
        allow_roles: Vec<String>,
        /// Permission allowed to view the region (repeatable).
        #[arg(long = "allow-permission")]
        allow_permissions: Vec<String>,
        /// Require every listed role/permission instead of any one.
        #[arg(long)]
        require_all: bool,

        /// Content to show when access is denied.
        #[arg(long)]
        fallback: Option<String>,
        /// Show the inline denial notice instead of the fallback.
        #[arg(long)]
        show_error: bool,
    },
    /// Print the effective role catalog as JSON.
    Roles,
}

fn parse_roles(raw: &[String]) -> Result<Vec<Role>> {
    raw.iter()
        .map(|r| r.parse::<Role>().with_context(|| format!("bad role '{}'", r)))
        .collect()
}

fn parse_permissions(raw: &[String]) -> Result<Vec<Permission>> {
    raw.iter()
        .map(|p| Permission::parse(p).with_context(|| format!("bad permission '{}'", p)))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn run_check(
    cfg: &EffectiveConfig,
    user: String,
    roles: &[String],
    permissions: &[String],
    catalog_defaults: bool,
    unloaded: bool,
    request: AccessRequest,
    fallback: Option<String>,
    show_error: bool,
) -> Result<bool> {
    let mut principal = Principal::new(user).with_permissions(parse_permissions(permissions)?);
    for role in parse_roles(roles)? {
        principal = principal.with_role(role);
    }
    if catalog_defaults {
        principal = principal.with_catalog_defaults(&cfg.catalog());
    }
    let ctx = if unloaded { ActorContext::anonymous() } else { ActorContext::for_principal(principal) };

    let mut gate = AccessGate::new(request).show_error(show_error).configured(cfg);
    if let Some(f) = fallback {
        gate = gate.with_fallback(f);
    }

    println!("{}", explain(&gate.request, &ctx));
    let rendered = gate.render(&ctx, || "<protected content>".to_string());
    let granted = matches!(rendered, Rendered::Children(_));
    match rendered {
        Rendered::Children(c) => println!("render: children {}", c),
        Rendered::Fallback(f) => println!("render: fallback {}", f),
        Rendered::DeniedNotice(n) => println!("render: notice {}", n),
        Rendered::Empty => println!("render: nothing"),
    }
    info!(target: "backoffice", request_id = %ctx.request_id, granted, "gate checked");
    Ok(granted)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let cfg = EffectiveConfig::from_env().context("loading configuration")?;
    match cli.command {
        Command::Check {
            user,
            roles,
            permissions,
            catalog_defaults,
            unloaded,
            allow_roles,
            allow_permissions,
            require_all,
            fallback,
            show_error,
        } => {
            let request = AccessRequest::any_role(parse_roles(&allow_roles)?)
                .with_permissions(parse_permissions(&allow_permissions)?)
                .require_all(require_all);
            let granted = run_check(
                &cfg,
                user,
                &roles,
                &permissions,
                catalog_defaults,
                unloaded,
                request,
                fallback,
                show_error,
            )?;
            Ok(if granted { ExitCode::SUCCESS } else { ExitCode::from(2) })
        }
        Command::Roles => {
            let catalog = cfg.catalog();
            let listing: serde_json::Map<String, serde_json::Value> = catalog
                .iter()
                .map(|(role, perms)| {
                    let names: Vec<&str> = perms.iter().map(|p| p.as_str()).collect();
                    (role.to_string(), serde_json::json!(names))
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listing)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
