use std::error::Error;
use std::fs;
use std::thread;
use std::time::Duration;

use toastool::workload::{Adam, Objective, Run, SgdMomentum};
use toastool::{
    Animator, AnimatorConfig, FileFrontend, Frontend, ProgressLine, Scale, TerminalFrontend,
};

/// Animate Adam and SGD with momentum on the Rosenbrock function
fn animate_training(
    frontend: Box<dyn Frontend>,
    iterations: usize,
    delay: Duration,
) -> Result<(), Box<dyn Error>> {
    let config = AnimatorConfig::new(iterations)
        .series(2)
        .xlabel("Iteration")
        .ylabel("Loss")
        .yscale(Scale::Log)
        .legend(["Adam", "SGD momentum"]);

    let mut adam = Run::new(Objective::Rosenbrock, Box::new(Adam::new(0.01, 0.9, 0.999, 1e-8)), 42);
    let mut sgd = Run::new(Objective::Rosenbrock, Box::new(SgdMomentum::new(1e-4, 0.9)), 42);

    let mut animator = Animator::new(config, frontend)?;
    while let Some(point) = animator.advance()? {
        point.set_y(&[adam.step() as f64, sgd.step() as f64]);
        thread::sleep(delay);
    }

    let history = animator.history();
    let last = |series: usize| history.ys(series).last().copied().unwrap_or(f64::NAN);
    println!("\nFinal Results:");
    println!("Adam         - Loss: {:.6}", last(0));
    println!("SGD momentum - Loss: {:.6}", last(1));

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Training Curve Animator");
    println!("=======================");

    let args: Vec<String> = std::env::args().collect();
    let mode = args.get(1).map(String::as_str).unwrap_or("terminal");
    let iterations = args.get(2).and_then(|n| n.parse().ok()).unwrap_or(200);
    let delay = Duration::from_millis(args.get(3).and_then(|ms| ms.parse().ok()).unwrap_or(20));

    let frontend: Box<dyn Frontend> = match mode {
        "svg" | "png" => {
            fs::create_dir_all("figures")?;
            let path = format!("figures/training.{}", mode);
            println!("Writing frames to '{}'", path);
            Box::new((FileFrontend::new(path), ProgressLine::new()?))
        }
        "terminal" => Box::new(TerminalFrontend::stdout()),
        "console" => Box::new(ProgressLine::new()?),
        _ => {
            println!("Unknown mode: {}. Available modes:", mode);
            println!("  terminal [n] [ms] - Braille chart redrawn in the terminal (default)");
            println!("  console [n] [ms]  - Progress line only");
            println!("  svg [n] [ms]      - Re-render figures/training.svg every iteration");
            println!("  png [n] [ms]      - Re-render figures/training.png every iteration");
            return Ok(());
        }
    };

    animate_training(frontend, iterations, delay)?;

    println!("\nDone!");

    Ok(())
}
