use std::error::Error;
use std::fs;

use ndarray::Array2;
use toastool::workload::{Adam, Objective, Run, SgdMomentum};
use toastool::{plot_to_file, AxesConfig, OutputFormat, PlotOptions, Scale, Series};

fn main() -> Result<(), Box<dyn Error>> {
    println!("Generating plots from synthetic training runs...");

    fs::create_dir_all("figures")?;
    generate_plateau_comparison_plot()?;
    generate_rosenbrock_lr_sweep_plot()?;

    println!("All plots generated successfully!");

    Ok(())
}

fn generate_plateau_comparison_plot() -> Result<(), Box<dyn Error>> {
    println!("Generating plateau comparison plot...");

    let iterations = 300;
    let adam = Run::new(Objective::Plateau, Box::new(Adam::new(0.05, 0.9, 0.999, 1e-8)), 1).losses(iterations);
    let sgd = Run::new(Objective::Plateau, Box::new(SgdMomentum::new(0.05, 0.9)), 1).losses(iterations);

    let options = PlotOptions {
        axes: AxesConfig::default()
            .xlabel("Iteration")
            .ylabel("Loss")
            .legend(["Adam", "SGD momentum"]),
        figsize: (7.0, 5.0).into(),
        ..PlotOptions::default()
    };
    plot_to_file("figures/plateau_comparison.svg", vec![adam, sgd], None, &options)?;

    println!("Plot saved as 'figures/plateau_comparison.svg'");
    Ok(())
}

fn generate_rosenbrock_lr_sweep_plot() -> Result<(), Box<dyn Error>> {
    println!("Generating Rosenbrock learning-rate sweep plot...");

    let iterations = 800;
    let learning_rates = [0.001f32, 0.003, 0.01, 0.03];

    let mut losses = Array2::<f64>::zeros((learning_rates.len(), iterations));
    for (row, &lr) in learning_rates.iter().enumerate() {
        let mut run = Run::new(Objective::Rosenbrock, Box::new(Adam::new(lr, 0.9, 0.999, 1e-8)), 42);
        for (col, loss) in run.losses(iterations).into_iter().enumerate() {
            losses[[row, col]] = loss;
        }
    }
    let steps: Vec<f64> = (1..=iterations).map(|i| i as f64).collect();

    let options = PlotOptions {
        axes: AxesConfig::default()
            .xlabel("Iteration")
            .ylabel("Loss")
            .yscale(Scale::Log)
            .legend(learning_rates.iter().map(|lr| format!("lr = {}", lr))),
        figsize: (7.0, 5.0).into(),
        format: OutputFormat::Png,
        ..PlotOptions::default()
    };
    plot_to_file("figures/rosenbrock_lr_sweep.png", steps, Some(Series::from(losses)), &options)?;

    println!("Plot saved as 'figures/rosenbrock_lr_sweep.png'");
    Ok(())
}
