use std::fs;
use std::process::Command;

use gnuggplot::layer::{Diagnostic, LayerKind};
use gnuggplot::parser::{parse_layer_args, LayerSpec};
use gnuggplot::{assemble, Environment, LayerStack, PlotError};

/// Run the built binary with the given arguments.
fn run_gnuggplot(args: &[&str]) -> Result<String, String> {
    let output = Command::new(env!("CARGO_BIN_EXE_gnuggplot"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).to_string())
    }
}

fn spec(kind: &str, pairs: &[(&str, &str)]) -> LayerSpec {
    LayerSpec::new(kind, Environment::from_pairs(pairs.iter().copied()))
}

#[test]
fn test_scenario_global_with_inline_sentinel() {
    let stack = LayerStack::from_specs([spec("global", &[("file", "-")])]).unwrap();
    assert_eq!(stack.global().get("file"), "");
    assert_eq!(
        stack.diagnostics().collect::<Vec<_>>(),
        vec![&Diagnostic::InlineGlobalData]
    );
    let script = assemble(stack.layers());
    assert_eq!(script.set_lines, "set datafile separator ' '\n");
    assert_eq!(script.plot_line, None);
}

#[test]
fn test_scenario_inline_point() {
    let stack = LayerStack::from_specs([spec(
        "point",
        &[("file", "-"), ("x_data", "1,2,3"), ("y_data", "1,4,9")],
    )])
    .unwrap();
    let point = &stack.layers()[0];
    assert!(point
        .plot_command()
        .ends_with("pointtype 8 pointsize 1 linecolor rgb 'black' notitle"));

    let script = assemble(stack.layers());
    assert_eq!(
        script.plot_line.as_deref(),
        Some("plot '-' with points pointtype 8 pointsize 1 linecolor rgb 'black' notitle")
    );
    let lines: Vec<_> = script.data_lines.lines().collect();
    assert_eq!(lines, vec!["1 1", "2 4", "3 9", "e"]);
}

#[test]
fn test_scenario_global_file_with_line_override() {
    let stack = LayerStack::from_specs([
        spec("global", &[("file", "data.csv"), ("x_data", "1"), ("y_data", "2")]),
        spec("line", &[("color", "red")]),
    ])
    .unwrap();
    let line = &stack.layers()[1];
    assert_eq!(line.kind(), LayerKind::Line);
    assert_eq!(line.local().get("x_data"), "1");
    assert_eq!(line.local().get("y_data"), "2");
    assert_eq!(line.local().get("color"), "red");
    assert_eq!(stack.global().get("color"), "black");
    assert!(line.plot_command().starts_with("'data.csv' using 1:2 with lines"));
    assert!(stack.diagnostics().next().is_none());
}

#[test]
fn test_scenario_invalid_legend_position() {
    let stack =
        LayerStack::from_specs([spec("theme", &[("legend_position", "diagonal")])]).unwrap();
    let script = assemble(stack.layers());
    assert_eq!(script.set_lines, "set key off\n");
    assert_eq!(
        stack.diagnostics().cloned().collect::<Vec<_>>(),
        vec![Diagnostic::InvalidLegendPosition("diagonal".to_string())]
    );
}

#[test]
fn test_second_labs_keeps_first_values() {
    let stack = LayerStack::from_specs([
        spec("labs", &[("title", "First"), ("xlab", "Time")]),
        spec("labs", &[("title", "Second")]),
    ])
    .unwrap();
    assert_eq!(stack.global().get("title"), "First");
    let conflicts: Vec<_> = stack
        .diagnostics()
        .filter(|d| matches!(d, Diagnostic::Conflict { .. }))
        .collect();
    // title, xlab and ylab were all written again by the second layer
    assert_eq!(conflicts.len(), 3);
}

#[test]
fn test_arguments_to_script() {
    let specs = parse_layer_args(&[
        "--global", "data.csv", "-x", "1", "-y", "2",
        "--line", "", "--color", "red", "--label", "Trend",
        "--point", "-", "-x", "1,2", "-y", "3,4", "--shape", "7",
        "--labs", "-x", "Day", "-y", "Value",
        "--theme", "--legend_position", "top",
    ])
    .unwrap();
    let stack = LayerStack::from_specs(specs).unwrap();
    let script = assemble(stack.layers()).to_string();
    assert_eq!(
        script,
        "set datafile separator ' '\n\
         set title ''\n\
         set xlabel 'Day'\n\
         set ylabel 'Value'\n\
         set key outside center top vertical\n\
         plot 'data.csv' using 1:2 with lines linetype 1 linewidth 1 linecolor rgb 'red' title 'Trend', \
         '-' with points pointtype 7 pointsize 1 linecolor rgb 'black' notitle\n\
         1 3\n\
         2 4\n\
         e\n"
    );
}

#[test]
fn test_unknown_layer_kind_from_json() {
    let specs = LayerSpec::list_from_json(r#"[{"kind": "histogram"}]"#).unwrap();
    let err = LayerStack::from_specs(specs).unwrap_err();
    assert!(matches!(err, PlotError::UnknownLayer(_)));
}

#[test]
fn test_end_to_end_dry_run() {
    let result = run_gnuggplot(&["--dry-run", "--", "--point", "-", "-x", "1,2,3", "-y", "1,4,9"]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert_eq!(
        result.unwrap(),
        "plot '-' with points pointtype 8 pointsize 1 linecolor rgb 'black' notitle\n1 1\n2 4\n3 9\ne\n"
    );
}

#[test]
fn test_end_to_end_layers_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layers.json");
    fs::write(
        &path,
        r#"[
            {"kind": "global", "values": {"file": "data.csv", "x_data": "1", "y_data": "2"}},
            {"kind": "bar", "values": {"color": "steelblue", "width": "0.5"}}
        ]"#,
    )
    .unwrap();
    let result = run_gnuggplot(&["--dry-run", "--layers", path.to_str().unwrap()]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    let script = result.unwrap();
    assert!(script.contains("set boxwidth 0.5 relative\n"));
    assert!(script.contains("plot 'data.csv' using 1:2 with boxes fillstyle solid linecolor rgb 'steelblue' notitle"));
}

#[test]
fn test_end_to_end_diagnostics_do_not_abort() {
    let result = run_gnuggplot(&["--dry-run", "--", "--theme", "--legend_position", "diagonal"]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert_eq!(result.unwrap(), "set key off\n");
}

#[test]
fn test_end_to_end_global_not_first() {
    let result = run_gnuggplot(&["--dry-run", "--", "--point", "d.dat", "--global", "d.dat"]);
    assert!(result.is_err(), "Should have failed with ordering error");
    let stderr = result.unwrap_err();
    assert!(stderr.contains("must be set first"));
    assert!(stderr.contains("Usage:"));
}

#[test]
fn test_end_to_end_unknown_option() {
    let result = run_gnuggplot(&["--dry-run", "--", "--line", "d.dat", "--smooth", "yes"]);
    assert!(result.is_err(), "Should have failed with usage error");
    assert!(result.unwrap_err().contains("unknown option '--smooth'"));
}

#[test]
fn test_end_to_end_no_layers() {
    let result = run_gnuggplot(&["--dry-run"]);
    assert!(result.is_err(), "Should have failed without layers");
    assert!(result.unwrap_err().contains("no layers given"));
}

#[cfg(unix)]
#[test]
fn test_end_to_end_engine_pipe() {
    let dir = tempfile::tempdir().unwrap();
    let received = dir.path().join("received.gp");
    let config = dir.path().join("engine.json");
    fs::write(
        &config,
        serde_json::json!({
            "program": "sh",
            "args": ["-c", format!("cat > '{}'", received.display())],
            "wait": false,
            "echo": false
        })
        .to_string(),
    )
    .unwrap();

    let result = run_gnuggplot(&[
        "--config", config.to_str().unwrap(),
        "--", "--line", "-", "-x", "0,1", "-y", "0,1", "--linetype", "2",
    ]);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert_eq!(result.unwrap(), "");
    assert_eq!(
        fs::read_to_string(received).unwrap(),
        "plot '-' with lines linetype 2 linewidth 1 linecolor rgb 'black' notitle\n0 0\n1 1\ne\n"
    );
}

#[cfg(unix)]
#[test]
fn test_end_to_end_interrupt_closes_engine() {
    use std::io::{BufRead, BufReader};
    use std::process::Stdio;

    let dir = tempfile::tempdir().unwrap();
    let received = dir.path().join("received.gp");
    let closed = dir.path().join("closed");
    let config = dir.path().join("engine.json");
    fs::write(
        &config,
        serde_json::json!({
            "program": "sh",
            "args": [
                "-c",
                format!("cat > '{}'; echo done > '{}'", received.display(), closed.display())
            ],
            "wait": true,
            "echo": false
        })
        .to_string(),
    )
    .unwrap();

    let mut child = Command::new(env!("CARGO_BIN_EXE_gnuggplot"))
        .args(["--config", config.to_str().unwrap()])
        .args(["--", "--point", "-", "-x", "1,2", "-y", "3,4"])
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // Held open so only the interrupt can release the session.
    let _stdin = child.stdin.take().unwrap();

    let mut stdout = BufReader::new(child.stdout.take().unwrap());
    let mut prompt = String::new();
    stdout.read_line(&mut prompt).unwrap();
    assert_eq!(prompt, "Press enter to exit\n");

    let pid = child.id().to_string();
    let kill = Command::new("kill")
        .args(["-INT", pid.as_str()])
        .status()
        .unwrap();
    assert!(kill.success());

    let status = child.wait().unwrap();
    assert!(status.success(), "exited with {status:?}");
    assert_eq!(fs::read_to_string(closed).unwrap(), "done\n");
    assert_eq!(
        fs::read_to_string(received).unwrap(),
        "plot '-' with points pointtype 8 pointsize 1 linecolor rgb 'black' notitle\n1 3\n2 4\ne\n"
    );
}
