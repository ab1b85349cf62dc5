use faer::Mat;
use matiter::{LinearProblem, LinearSolver, MethodReport, SolveOptions, SolverContext, SolverKind};
use rand::Rng;

fn main() {
    let n = 50;
    // build a random SPD matrix: A = MᵀM + n·I
    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..n * n).map(|_| rng.r#gen()).collect();
    let m = Mat::from_fn(n, n, |i, j| data[j * n + i]);
    let m_t = m.transpose();
    let mut a = &m_t * &m;
    for i in 0..n {
        a[(i, i)] = a[(i, i)] + n as f64;
    }

    // b = A·1
    let problem = LinearProblem::new(a, None).unwrap();
    let opts = SolveOptions::new().with_tol(1e-10);

    for kind in SolverKind::ALL {
        let solver = SolverContext::with_defaults(kind);
        let (x, info) = solver.solve_with(&problem.a, &problem.b, &opts).unwrap();
        println!("{}", MethodReport::new(kind.name(), &x, &problem.x_exact, info));
    }
}
