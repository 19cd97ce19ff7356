//! `shipkit publish`: one release cycle for the project at the root.

use crate::{
    cli::PublishArgs,
    config::ShipConfig,
    debug, log,
    logger::banner,
    publish::Publisher,
};
use anyhow::Result;

/// Run the release workflow (or just print it with `--dry-run`).
pub fn run_publish(config: &ShipConfig, args: &PublishArgs) -> Result<()> {
    let publisher = Publisher::new(&config.publish, config.get_root());

    if args.dry_run {
        let plan = publisher.plan()?;
        log!("publish"; "dry run for {} in {}", plan.package, config.get_root().display());
        log!("version"; "would bump {} → {}", plan.current, plan.next);
        for line in publisher.describe(&plan) {
            log!("plan"; "{}", line);
        }
        return Ok(());
    }

    banner("shipkit publish");
    let release = publisher.run()?;

    for artifact in &release.artifacts {
        debug!("upload"; "sent {}", artifact.display());
    }
    log!("done"; "{} {} → {}", release.package, release.previous, release.version);
    log!("done"; "view at: {}", release.project_url);
    println!();
    banner(&format!("SUCCESS! Version {} published!", release.version));
    println!();
    println!("Users can now install with:");
    println!("  pip install --upgrade {}", release.package);
    Ok(())
}
