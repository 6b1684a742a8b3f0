use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use client_core::{
    config,
    presentation::{MANAGER_NOTIFICATION, SCRIPTED_TRANSCRIPT},
    render, HttpRecommendationProvider, MissingRecommendationProvider, RecommendationProvider,
    RecommendationWorkflow, RenderedGroupItem, StaticFallbackProvider, SubmitOutcome,
};

#[derive(Parser, Debug)]
struct Args {
    /// Identifier to request recommendations for (e.g. G01234567).
    #[arg(long)]
    user_id: String,
    /// Recommendation endpoint base URL; overrides the configured one.
    #[arg(long)]
    server_url: Option<String>,
    /// Also print the scripted assistant transcript and the manager
    /// approval notification.
    #[arg(long)]
    show_panels: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = Some(server_url);
    }

    let provider: Arc<dyn RecommendationProvider> = match &settings.server_url {
        Some(url) => Arc::new(HttpRecommendationProvider::new(url.clone())),
        None => Arc::new(MissingRecommendationProvider),
    };
    let fallback = Arc::new(StaticFallbackProvider::demo_with_delay(
        settings.fallback_delay(),
    ));
    let workflow = RecommendationWorkflow::new(provider, fallback);

    let outcome = workflow.submit(&args.user_id).await;
    let snapshot = workflow.snapshot().await;

    if let Some(message) = snapshot.error_message {
        println!("{message}");
        return Ok(());
    }

    let Some(result) = snapshot.result else {
        println!("No recommendations available for {}.", args.user_id.trim());
        return Ok(());
    };

    if outcome == SubmitOutcome::FellBack {
        println!("(live endpoint unavailable; showing demo data)");
        println!();
    }

    let rendered = render::render(
        &result,
        &settings.highlight_list(),
        &settings.request_system_url,
    );

    println!(
        "Recommendations for: {} ({})",
        rendered.user_id, rendered.department
    );
    println!("Open a group's request link to start the access request.");
    println!();
    print_group("Essential Groups", &rendered.essential);
    println!();
    print_group("Optional Groups", &rendered.optional);

    if args.show_panels {
        print_transcript();
        print_notification();
    }

    Ok(())
}

fn print_group(title: &str, items: &[RenderedGroupItem]) {
    println!("{title}:");
    for item in items {
        let selected = if item.highlighted { "[x]" } else { "[ ]" };
        let ai_marker = if item.ai_suggested {
            " (AI suggested)"
        } else {
            ""
        };
        println!("  {selected} {}{ai_marker}", item.name);
        println!("      request: {}", item.request_url);
    }
}

fn print_transcript() {
    println!();
    println!("--- AccessHub AI Chatbot ---");
    for message in SCRIPTED_TRANSCRIPT {
        println!("{}: {}", message.sender.display_name(), message.text);
    }
}

fn print_notification() {
    let notification = MANAGER_NOTIFICATION;
    println!();
    println!("--- Pending approval ({}) ---", notification.manager_name);
    println!(
        "{} have requested permission to those groups:",
        notification.requester_id
    );
    for group in notification.requested_groups {
        let marker = if *group == notification.flagged_group {
            "! "
        } else {
            "  "
        };
        println!("  {marker}{group}");
    }
    println!("{}", notification.anomaly_note);
    println!("Please review and approve if required.");
}
