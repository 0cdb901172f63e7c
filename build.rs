fn main() {
    // Release pipelines set GIT_SHA/BUILD_DATE in the environment; local
    // builds fall back to asking git and date, then to "unknown".
    let git_sha = build_env("GIT_SHA", "git", &["rev-parse", "--short", "HEAD"]);
    println!("cargo:rustc-env=GIT_SHA={}", git_sha);

    let build_date = build_env("BUILD_DATE", "date", &["+%Y-%m-%d"]);
    println!("cargo:rustc-env=BUILD_DATE={}", build_date);
}

fn build_env(var: &str, command: &str, args: &[&str]) -> String {
    std::env::var(var)
        .ok()
        .or_else(|| {
            std::process::Command::new(command)
                .args(args)
                .output()
                .ok()
                .filter(|output| output.status.success())
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        })
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
