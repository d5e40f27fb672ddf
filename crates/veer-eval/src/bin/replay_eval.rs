use std::env;
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut args = env::args();
    let _bin = args.next();
    let Some(path) = args.next() else {
        eprintln!("usage: replay_eval <dataset.json>");
        process::exit(2);
    };

    match veer_eval::evaluate_dataset_path(&path) {
        Ok(report) => {
            println!("dataset: {}", report.dataset_name);
            println!("sessions: {}", report.session_count);
            println!("detected: {}", report.detected_count);
            println!(
                "mean |delta theta| error (deg): {:.6}",
                report.mean_abs_delta_theta_error
            );
            println!(
                "mean |veering| error: {:.6}",
                report.mean_abs_veering_error
            );
            if report.failures.is_empty() {
                println!("status: PASS");
                process::exit(0);
            }

            println!("status: FAIL");
            for failure in report.failures {
                println!("- {}", failure);
            }
            process::exit(1);
        }
        Err(err) => {
            eprintln!("evaluation failed: {err}");
            process::exit(1);
        }
    }
}
