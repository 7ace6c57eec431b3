//! Derivative-free minimization for parameter estimation.

/// Options controlling the simplex search.
#[derive(Debug, Clone)]
pub struct MinimizeOptions {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Convergence tolerance on both objective spread and simplex size.
    pub tolerance: f64,
    /// Relative step used to seed the initial simplex.
    pub initial_step: f64,
}

impl Default for MinimizeOptions {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-8,
            initial_step: 0.05,
        }
    }
}

/// Outcome of a minimization run.
#[derive(Debug, Clone)]
pub struct Minimum {
    /// Best point found.
    pub point: Vec<f64>,
    /// Objective value at the best point.
    pub value: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the tolerance criterion was met before the iteration cap.
    pub converged: bool,
}

// Standard Nelder-Mead coefficients.
const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Minimize `objective` with the Nelder-Mead simplex method.
///
/// `bounds` gives optional (min, max) box constraints per dimension; points
/// are clamped into the box before evaluation, so the optimum can sit on a
/// boundary.
pub fn minimize<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    options: MinimizeOptions,
) -> Minimum
where
    F: Fn(&[f64]) -> f64,
{
    let dim = initial.len();
    if dim == 0 {
        return Minimum {
            point: vec![],
            value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let clamp = |mut point: Vec<f64>| -> Vec<f64> {
        if let Some(bounds) = bounds {
            for (x, &(lo, hi)) in point.iter_mut().zip(bounds.iter()) {
                *x = x.clamp(lo, hi);
            }
        }
        point
    };

    // Seed the simplex: the initial point plus one perturbed vertex per axis.
    let mut vertices: Vec<(Vec<f64>, f64)> = Vec::with_capacity(dim + 1);
    let seed = clamp(initial.to_vec());
    let seed_value = objective(&seed);
    vertices.push((seed, seed_value));
    for axis in 0..dim {
        let mut vertex = initial.to_vec();
        let step = if initial[axis].abs() > 1e-10 {
            options.initial_step * initial[axis].abs()
        } else {
            options.initial_step
        };
        vertex[axis] += step;
        let vertex = clamp(vertex);
        let value = objective(&vertex);
        vertices.push((vertex, value));
    }

    let order = |vertices: &mut Vec<(Vec<f64>, f64)>| {
        vertices.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    };

    let mut iterations = 0;
    let mut converged = false;

    while iterations < options.max_iterations {
        iterations += 1;
        order(&mut vertices);

        let spread = vertices[dim].1 - vertices[0].1;
        if spread < options.tolerance {
            converged = true;
            break;
        }

        // Centroid of every vertex except the worst.
        let mut centroid = vec![0.0; dim];
        for (vertex, _) in &vertices[..dim] {
            for (c, x) in centroid.iter_mut().zip(vertex.iter()) {
                *c += x;
            }
        }
        for c in &mut centroid {
            *c /= dim as f64;
        }

        let collapsed = vertices.iter().all(|(vertex, _)| {
            vertex
                .iter()
                .zip(centroid.iter())
                .map(|(x, c)| (x - c) * (x - c))
                .sum::<f64>()
                .sqrt()
                < options.tolerance
        });
        if collapsed {
            converged = true;
            break;
        }

        let worst = vertices[dim].clone();
        let towards = |target: &[f64], factor: f64| -> Vec<f64> {
            clamp(
                centroid
                    .iter()
                    .zip(target.iter())
                    .map(|(c, t)| c + factor * (t - c))
                    .collect(),
            )
        };

        let reflected = towards(&worst.0, -REFLECT);
        let reflected_value = objective(&reflected);

        if reflected_value < vertices[0].1 {
            // Best so far: try stretching further in the same direction.
            let expanded = towards(&reflected, EXPAND);
            let expanded_value = objective(&expanded);
            vertices[dim] = if expanded_value < reflected_value {
                (expanded, expanded_value)
            } else {
                (reflected, reflected_value)
            };
            continue;
        }

        if reflected_value < vertices[dim - 1].1 {
            vertices[dim] = (reflected, reflected_value);
            continue;
        }

        // Contract towards the better of the reflected and worst points.
        let (target, target_value) = if reflected_value < worst.1 {
            (&reflected, reflected_value)
        } else {
            (&worst.0, worst.1)
        };
        let contracted = towards(target, CONTRACT);
        let contracted_value = objective(&contracted);
        if contracted_value < target_value {
            vertices[dim] = (contracted, contracted_value);
            continue;
        }

        // Contraction failed: shrink the whole simplex onto the best vertex.
        let best = vertices[0].0.clone();
        for (vertex, value) in vertices.iter_mut().skip(1) {
            for (x, b) in vertex.iter_mut().zip(best.iter()) {
                *x = b + SHRINK * (*x - b);
            }
            *vertex = clamp(std::mem::take(vertex));
            *value = objective(vertex.as_slice());
        }
    }

    order(&mut vertices);
    let (point, value) = vertices.swap_remove(0);
    Minimum {
        point,
        value,
        iterations,
        converged,
    }
}
