//! `prism <scene.json>`: build a scene from a script, upload it, and run
//! the census kernel over the device copy.

use std::process::ExitCode;

use prism::prelude::*;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("PRISM_LOG", "info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: prism <scene.json>");
        return ExitCode::FAILURE;
    }

    let mut scene = Scene::default();
    let result = render(&args[1], &mut scene);
    scene.destroy();
    match result {
        Ok(census) => {
            log::info!(
                "census: {} spheres, {} planes, {} lights, {} emissive surfaces, {} bytes",
                census.spheres,
                census.planes,
                census.lights,
                census.emissive_surfaces,
                census.bytes_visited,
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn render(path: &str, scene: &mut Scene) -> Result<Census, Box<dyn std::error::Error>> {
    run_file(path, scene)?;
    let mut device = HostDevice::new();
    let uploaded = upload_scene(&mut device, &scene.freeze())?;
    let config = LaunchConfig::default();
    log::info!(
        "launching census on {} threads ({}x{} image)",
        config.resolved_threads(),
        uploaded.render().width,
        uploaded.render().height,
    );
    Ok(CensusKernel::run_all(&uploaded, &config)?)
}
