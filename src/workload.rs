//! Demo data only. Small synthetic training runs that produce loss curves
//! for the `toastool` and `generate_plot` binaries. The animator and plotting
//! modules never depend on anything here.

use ndarray::Array1;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Functions with known gradients to minimize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// `tanh(|x|^2) + 0.1 * |x - 3|^2` in two dimensions; flat near the origin.
    Plateau,
    Rosenbrock,
}

impl Objective {
    pub fn dimension(&self) -> usize {
        match self {
            Objective::Plateau => 2,
            Objective::Rosenbrock => 5,
        }
    }

    pub fn value(&self, x: &Array1<f32>) -> f32 {
        match self {
            Objective::Plateau => {
                let (x1, x2) = (x[0], x[1]);
                (x1.powi(2) + x2.powi(2)).tanh() + 0.1 * ((x1 - 3.0).powi(2) + (x2 - 3.0).powi(2))
            }
            Objective::Rosenbrock => (0..x.len() - 1)
                .map(|i| 100.0 * (x[i + 1] - x[i].powi(2)).powi(2) + (1.0 - x[i]).powi(2))
                .sum(),
        }
    }

    pub fn gradient(&self, x: &Array1<f32>) -> Array1<f32> {
        match self {
            Objective::Plateau => {
                let (x1, x2) = (x[0], x[1]);
                let z = x1.powi(2) + x2.powi(2);
                let sech_squared = 1.0 / z.cosh().powi(2);
                Array1::from_vec(vec![
                    2.0 * x1 * sech_squared + 0.2 * (x1 - 3.0),
                    2.0 * x2 * sech_squared + 0.2 * (x2 - 3.0),
                ])
            }
            Objective::Rosenbrock => {
                let n = x.len();
                let mut grad = Array1::zeros(n);
                for i in 0..n - 1 {
                    grad[i] += -400.0 * x[i] * (x[i + 1] - x[i].powi(2)) - 2.0 * (1.0 - x[i]);
                }
                for i in 1..n {
                    grad[i] += 200.0 * (x[i] - x[i - 1].powi(2));
                }
                grad
            }
        }
    }
}

pub trait Optimizer {
    fn step(&mut self, params: &mut Array1<f32>, grad: &Array1<f32>);
}

pub struct Adam {
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    m: Option<Array1<f32>>,
    v: Option<Array1<f32>>,
    t: i32,
}

impl Adam {
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            lr,
            beta1,
            beta2,
            epsilon,
            m: None,
            v: None,
            t: 0,
        }
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut Array1<f32>, grad: &Array1<f32>) {
        self.t += 1;

        let m = self.m.get_or_insert_with(|| Array1::zeros(params.len()));
        let v = self.v.get_or_insert_with(|| Array1::zeros(params.len()));

        *m = self.beta1 * &*m + (1.0 - self.beta1) * grad;
        *v = self.beta2 * &*v + (1.0 - self.beta2) * (grad * grad);

        // Bias-corrected moments
        let m_hat = &*m / (1.0 - self.beta1.powi(self.t));
        let v_hat = &*v / (1.0 - self.beta2.powi(self.t));

        *params = &*params - &(self.lr * &m_hat / (v_hat.mapv(f32::sqrt) + self.epsilon));
    }
}

pub struct SgdMomentum {
    lr: f32,
    momentum: f32,
    velocity: Option<Array1<f32>>,
}

impl SgdMomentum {
    pub fn new(lr: f32, momentum: f32) -> Self {
        Self {
            lr,
            momentum,
            velocity: None,
        }
    }
}

impl Optimizer for SgdMomentum {
    fn step(&mut self, params: &mut Array1<f32>, grad: &Array1<f32>) {
        let v = self.velocity.get_or_insert_with(|| Array1::zeros(params.len()));
        *v = self.momentum * &*v - self.lr * grad;
        *params = &*params + &*v;
    }
}

/// An optimizer stepping on an objective from a seeded random start.
pub struct Run {
    objective: Objective,
    optimizer: Box<dyn Optimizer>,
    params: Array1<f32>,
}

impl Run {
    pub fn new(objective: Objective, optimizer: Box<dyn Optimizer>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let params = Array1::random_using(objective.dimension(), Uniform::new(-0.1, 0.1), &mut rng);
        Self {
            objective,
            optimizer,
            params,
        }
    }

    /// Evaluates the loss at the current parameters, then takes one step.
    pub fn step(&mut self) -> f32 {
        let loss = self.objective.value(&self.params);
        let grad = self.objective.gradient(&self.params);
        self.optimizer.step(&mut self.params, &grad);
        loss
    }

    /// Losses of the next `steps` steps.
    pub fn losses(&mut self, steps: usize) -> Vec<f64> {
        (0..steps).map(|_| self.step() as f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rosenbrock_minimum() {
        let ones = Array1::from_elem(5, 1.0f32);
        assert_eq!(Objective::Rosenbrock.value(&ones), 0.0);
        assert!(Objective::Rosenbrock.gradient(&ones).iter().all(|g| g.abs() < 1e-6));
    }

    #[test]
    fn test_plateau_gradient_matches_finite_difference() {
        let x = Array1::from_vec(vec![0.7f32, -0.4]);
        let grad = Objective::Plateau.gradient(&x);
        let h = 1e-3;
        for i in 0..2 {
            let mut up = x.clone();
            let mut down = x.clone();
            up[i] += h;
            down[i] -= h;
            let numeric = (Objective::Plateau.value(&up) - Objective::Plateau.value(&down)) / (2.0 * h);
            assert!((numeric - grad[i]).abs() < 1e-2, "{} vs {}", numeric, grad[i]);
        }
    }

    #[test]
    fn test_optimizers_reduce_plateau_loss() {
        let optimizers: Vec<Box<dyn Optimizer>> = vec![
            Box::new(Adam::new(0.05, 0.9, 0.999, 1e-8)),
            Box::new(SgdMomentum::new(0.05, 0.9)),
        ];
        for optimizer in optimizers {
            let mut run = Run::new(Objective::Plateau, optimizer, 7);
            let losses = run.losses(300);
            assert!(losses[299] < losses[0]);
        }
    }

    #[test]
    fn test_runs_are_reproducible() {
        let mut a = Run::new(Objective::Rosenbrock, Box::new(SgdMomentum::new(1e-4, 0.9)), 3);
        let mut b = Run::new(Objective::Rosenbrock, Box::new(SgdMomentum::new(1e-4, 0.9)), 3);
        assert_eq!(a.losses(20), b.losses(20));
    }
}
