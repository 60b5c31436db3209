//! Teacher console: problem authoring, submission review, class
//! management and teaching materials.

use std::fs;
use std::path::Path;

use platform::StoreError;
use platform::entity::{Submission, TypingPoint};
use platform::models::{NewProblem, NewStudent, ProblemPatch, StudentPatch};
use platform::roster;
use tracing::warn;

use crate::App;
use crate::console;

pub async fn console(app: &mut App) -> anyhow::Result<()> {
    println!("\n{}", app.text("teacherDashboard.title"));
    loop {
        println!();
        println!(
            "Commands: problems, create, edit <problem>, submissions <problem>, classes, \
             materials, locale <en|ko>, logout"
        );
        let input = console::prompt("teacher>")?;
        let (command, rest) = console::split_command(&input);
        match command {
            "problems" => list_problems(app),
            "create" => create_problem(app)?,
            "edit" => edit_problem(app, rest)?,
            "submissions" => review_submissions(app, rest).await?,
            "classes" => manage_classes(app)?,
            "materials" => manage_materials(app)?,
            "locale" => app.switch_locale(rest)?,
            "logout" => {
                app.store.logout()?;
                return Ok(());
            }
            "" => {}
            other => println!("Unknown command: {other}"),
        }
    }
}

/// Print a domain validation failure and carry on; storage failures
/// propagate.
fn report<T>(result: platform::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StoreError::Storage(e)) => Err(e.into()),
        Err(e) => {
            println!("{e}");
            Ok(None)
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

// --- problems ---------------------------------------------------------

fn list_problems(app: &App) {
    let problems = app.store.problems();
    if problems.is_empty() {
        println!("{}", app.text("teacherDashboard.noProblems"));
        return;
    }
    for (index, problem) in problems.iter().enumerate() {
        let submissions = app.store.submissions_for_problem(&problem.id).len();
        println!(
            "{:>3}. {} [{}] ({submissions} submissions)",
            index + 1,
            problem.display_title(&app.translations, app.locale),
            problem.id,
        );
    }
}

fn create_problem(app: &mut App) -> anyhow::Result<()> {
    println!("{}", app.text("createProblemModal.title"));
    let title = console::prompt(&app.text("createProblemModal.problemTitle"))?;
    if title.is_empty() {
        println!("{}", app.text("createProblemModal.cancel"));
        return Ok(());
    }
    let description = console::read_block(&app.text("createProblemModal.description"))?;
    let initial_code = console::read_block(&app.text("createProblemModal.initialCode"))?;
    let problem = app.store.add_problem(NewProblem {
        title,
        description,
        initial_code,
        hint: None,
    });
    println!("Created {}.", problem.id);
    Ok(())
}

fn edit_problem(app: &mut App, selector: &str) -> anyhow::Result<()> {
    let Some(problem) = app.find_problem(selector) else {
        println!("{}", app.text("codingPage.problemNotFound"));
        return Ok(());
    };
    println!(
        "{}: {}",
        app.text("editProblemModal.title"),
        problem.display_title(&app.translations, app.locale),
    );
    println!("(blank keeps the current value)");
    let title = console::prompt(&app.text("createProblemModal.problemTitle"))?;
    let description = console::read_block(&app.text("createProblemModal.description"))?;
    let initial_code = console::read_block(&app.text("createProblemModal.initialCode"))?;
    let hint = console::prompt("Hint")?;
    app.store.update_problem(
        &problem.id,
        ProblemPatch {
            title: non_empty(title),
            description: non_empty(description),
            initial_code: non_empty(initial_code),
            hint: non_empty(hint),
        },
    );
    println!("Saved.");
    Ok(())
}

// --- submissions ------------------------------------------------------

async fn review_submissions(app: &mut App, selector: &str) -> anyhow::Result<()> {
    let Some(problem) = app.find_problem(selector) else {
        println!("{}", app.text("codingPage.problemNotFound"));
        return Ok(());
    };
    println!("\n{}", problem.display_title(&app.translations, app.locale));

    let submissions: Vec<Submission> = app
        .store
        .submissions_for_problem(&problem.id)
        .into_iter()
        .cloned()
        .collect();
    if submissions.is_empty() {
        println!("{}", app.text("problemSubmissions.noSubmissions"));
        return Ok(());
    }
    for (index, submission) in submissions.iter().enumerate() {
        println!(
            "{:>3}. {} - {} {}",
            index + 1,
            student_name(app, &submission.student_id),
            app.text("problemSubmissions.submittedAt"),
            submission.submitted_at.format("%Y-%m-%d %H:%M"),
        );
    }

    let choice = console::prompt(&app.text("problemSubmissions.viewDetails"))?;
    let Some(submission) = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| submissions.get(index))
    else {
        return Ok(());
    };
    submission_detail(app, submission).await
}

async fn submission_detail(app: &App, submission: &Submission) -> anyhow::Result<()> {
    println!("\n{}", app.text("submissionDetail.title"));
    println!(
        "{}: {}",
        app.text("submissionDetail.student"),
        student_name(app, &submission.student_id),
    );
    let class = app
        .store
        .classroom(&submission.class_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| submission.class_id.clone());
    println!("{}: {class}", app.text("submissionDetail.class"));
    println!(
        "{}: {}",
        app.text("submissionDetail.submittedAt"),
        submission.submitted_at.format("%Y-%m-%d %H:%M:%S"),
    );
    println!("\n{}:", app.text("submissionDetail.finalCode"));
    println!("{}", submission.final_code);
    typing_summary(app, &submission.typing_history);

    if console::confirm(&app.text("codeFeedback.title"))? {
        app.show_feedback(&submission.final_code).await;
    }
    if console::confirm(&app.text("codeExplanation.title"))? {
        app.show_explanation(&submission.final_code).await;
    }
    Ok(())
}

fn student_name(app: &App, student_id: &str) -> String {
    app.store
        .student(student_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| student_id.to_string())
}

/// Text rendering of the typing trace: a coarse code-length curve plus
/// the end-of-attempt totals.
fn typing_summary(app: &App, history: &[TypingPoint]) {
    println!("\n{}", app.text("typingGraph.title"));
    let Some(last) = history.last() else {
        println!("  -");
        return;
    };

    println!("  {}:", app.text("typingGraph.legend"));
    let peak = history
        .iter()
        .map(|point| point.code_length)
        .max()
        .unwrap_or(0)
        .max(1);
    for point in sample(history, 10) {
        println!(
            "  {:>7.1}s {} {}",
            point.timestamp_ms as f64 / 1000.0,
            "#".repeat(point.code_length * 40 / peak),
            point.code_length,
        );
    }
    println!(
        "  {}: {:.1}",
        app.text("typingGraph.timeLabel"),
        last.timestamp_ms as f64 / 1000.0,
    );
    println!(
        "  {}: {}",
        app.text("typingGraph.charLabel"),
        last.code_length,
    );
}

/// At most `n` evenly spaced points, always keeping the first and last.
fn sample(history: &[TypingPoint], n: usize) -> Vec<&TypingPoint> {
    if history.len() <= n {
        return history.iter().collect();
    }
    let step = (history.len() - 1) as f64 / (n - 1) as f64;
    (0..n)
        .map(|i| &history[(i as f64 * step).round() as usize])
        .collect()
}

// --- classes ----------------------------------------------------------

fn manage_classes(app: &mut App) -> anyhow::Result<()> {
    println!("\n{}", app.text("classManagement.title"));
    loop {
        let classrooms = app.store.classrooms();
        if classrooms.is_empty() {
            println!("{}", app.text("teacherDashboard.noClassroomsMessage"));
        } else {
            for (index, classroom) in classrooms.iter().enumerate() {
                println!(
                    "{:>3}. {} [{}] ({} {})",
                    index + 1,
                    classroom.name,
                    classroom.id,
                    classroom.student_ids.len(),
                    app.text("classManagement.students"),
                );
            }
        }
        println!();
        println!(
            "Commands: addclass, students <class>, addstudent <class>, \
             import <class> <file.csv>, editstudent <student>, back"
        );
        let input = console::prompt("classes>")?;
        let (command, rest) = console::split_command(&input);
        match command {
            "addclass" => add_class(app)?,
            "students" => list_students(app, rest),
            "addstudent" => add_student(app, rest)?,
            "import" => import_roster(app, rest)?,
            "editstudent" => edit_student(app, rest)?,
            "back" => return Ok(()),
            "" => {}
            other => println!("Unknown command: {other}"),
        }
    }
}

fn find_classroom_id(app: &App, selector: &str) -> Option<String> {
    if let Ok(n) = selector.parse::<usize>() {
        return app
            .store
            .classrooms()
            .get(n.checked_sub(1)?)
            .map(|c| c.id.clone());
    }
    app.store.classroom(selector).map(|c| c.id.clone())
}

fn add_class(app: &mut App) -> anyhow::Result<()> {
    let name = console::prompt(&app.text("classManagement.newClassName"))?;
    if name.is_empty() {
        return Ok(());
    }
    let classroom = app.store.add_classroom(&name);
    println!("Created {}.", classroom.id);
    Ok(())
}

fn list_students(app: &App, selector: &str) {
    let Some(classroom_id) = find_classroom_id(app, selector) else {
        println!("Unknown class: {selector}");
        return;
    };
    let students = app.store.students_in(&classroom_id);
    if students.is_empty() {
        println!("{}", app.text("classManagement.noStudents"));
        return;
    }
    for student in students {
        let number = student
            .student_number
            .as_deref()
            .map(|n| format!(" #{n}"))
            .unwrap_or_default();
        println!(
            "  {} ({}) [{}]{number}",
            student.name, student.username, student.id,
        );
    }
}

fn add_student(app: &mut App, selector: &str) -> anyhow::Result<()> {
    let Some(classroom_id) = find_classroom_id(app, selector) else {
        println!("Unknown class: {selector}");
        return Ok(());
    };
    let name = console::prompt(&app.text("classManagement.newStudentName"))?;
    let username = console::prompt(&app.text("classManagement.username"))?;
    let password = console::prompt(&app.text("classManagement.password"))?;
    let student_number = console::prompt(&app.text("classManagement.studentNumber"))?;
    if name.is_empty() || username.is_empty() || password.is_empty() {
        println!("{}", app.text("classManagement.addStudentAlert"));
        return Ok(());
    }
    let data = NewStudent {
        name,
        username,
        password,
        student_number: non_empty(student_number),
    };
    if let Some(student) = report(app.store.add_student_to_classroom(data, &classroom_id))? {
        println!("+ {} ({})", student.name, student.username);
    }
    Ok(())
}

fn import_roster(app: &mut App, rest: &str) -> anyhow::Result<()> {
    let (selector, inline_path) = console::split_command(rest);
    let Some(classroom_id) = find_classroom_id(app, selector) else {
        println!("Unknown class: {selector}");
        return Ok(());
    };
    let path = if inline_path.is_empty() {
        console::prompt(&app.text("classManagement.bulkAdd"))?
    } else {
        inline_path.to_string()
    };
    if path.is_empty() {
        return Ok(());
    }

    let entries = match roster::load_roster(Path::new(&path)) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, path = %path, "roster import failed");
            println!("{}", app.text("classManagement.bulkAddFileError"));
            return Ok(());
        }
    };
    if entries.is_empty() {
        println!("{}", app.text("classManagement.bulkAddNoData"));
        return Ok(());
    }
    if let Some(count) = report(app.store.add_students_to_classroom(entries, &classroom_id))? {
        println!(
            "{}",
            app.text("classManagement.bulkAddSuccess")
                .replace("{count}", &count.to_string()),
        );
    }
    Ok(())
}

fn edit_student(app: &mut App, selector: &str) -> anyhow::Result<()> {
    let Some(student) = app
        .store
        .students()
        .iter()
        .find(|s| s.id == selector || s.username == selector)
        .cloned()
    else {
        println!("Unknown student: {selector}");
        return Ok(());
    };
    println!(
        "{}: {} ({})",
        app.text("editStudentModal.title"),
        student.name,
        student.username,
    );
    println!("(blank keeps the current value, '-' clears the student number)");
    let name = console::prompt(&app.text("editStudentModal.name"))?;
    let username = console::prompt(&app.text("editStudentModal.username"))?;
    let student_number = console::prompt(&app.text("editStudentModal.studentNumber"))?;
    println!("({})", app.text("editStudentModal.newPasswordPlaceholder"));
    let password = console::prompt(&app.text("editStudentModal.newPassword"))?;

    let patch = StudentPatch {
        name: non_empty(name),
        username: non_empty(username),
        password: non_empty(password),
        student_number: match student_number.as_str() {
            "" => None,
            "-" => Some(String::new()),
            other => Some(other.to_string()),
        },
    };
    if report(app.store.update_student(&student.id, patch))?.is_some() {
        println!("Saved.");
    }
    Ok(())
}

// --- materials --------------------------------------------------------

fn manage_materials(app: &mut App) -> anyhow::Result<()> {
    println!("\n{}", app.text("materials.title"));
    loop {
        let materials = app.store.materials();
        if materials.is_empty() {
            println!("{}", app.text("materials.noMaterials"));
        } else {
            for (index, material) in materials.iter().enumerate() {
                println!(
                    "{:>3}. {} - {} ({} bytes, {})",
                    index + 1,
                    material.name,
                    material.file_name,
                    material.size_bytes,
                    material.uploaded_at.format("%Y-%m-%d"),
                );
            }
        }
        println!();
        println!("Commands: upload, export <material> <path>, delete <material>, back");
        let input = console::prompt("materials>")?;
        let (command, rest) = console::split_command(&input);
        match command {
            "upload" => upload_material(app)?,
            "export" => export_material(app, rest)?,
            "delete" => delete_material(app, rest)?,
            "back" => return Ok(()),
            "" => {}
            other => println!("Unknown command: {other}"),
        }
    }
}

fn find_material_id(app: &App, selector: &str) -> Option<String> {
    if let Ok(n) = selector.parse::<usize>() {
        return app
            .store
            .materials()
            .get(n.checked_sub(1)?)
            .map(|m| m.id.clone());
    }
    app.store
        .materials()
        .iter()
        .find(|m| m.id == selector)
        .map(|m| m.id.clone())
}

fn upload_material(app: &mut App) -> anyhow::Result<()> {
    println!("{}", app.text("uploadMaterialModal.title"));
    let name = console::prompt(&app.text("uploadMaterialModal.name"))?;
    if name.is_empty() {
        println!("{}", app.text("uploadMaterialModal.errorName"));
        return Ok(());
    }
    let description = console::prompt(&app.text("uploadMaterialModal.description"))?;
    let path = console::prompt(&app.text("uploadMaterialModal.file"))?;
    if path.is_empty() {
        println!("{}", app.text("uploadMaterialModal.errorFile"));
        return Ok(());
    }
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("{}: {e}", app.text("uploadMaterialModal.errorFile"));
            return Ok(());
        }
    };
    let file_name = Path::new(&path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.clone());
    let material = app
        .store
        .add_material(&name, &description, &file_name, &bytes)?;
    println!("+ {} ({} bytes)", material.file_name, material.size_bytes);
    Ok(())
}

fn export_material(app: &App, rest: &str) -> anyhow::Result<()> {
    let (selector, path) = console::split_command(rest);
    if path.is_empty() {
        println!("Usage: export <material> <path>");
        return Ok(());
    }
    let Some(material_id) = find_material_id(app, selector) else {
        println!("Unknown material: {selector}");
        return Ok(());
    };
    let Some(bytes) = app.store.material_bytes(&material_id)? else {
        println!("Unknown material: {selector}");
        return Ok(());
    };
    match fs::write(path, &bytes) {
        Ok(()) => println!("{material_id} -> {path} ({} bytes)", bytes.len()),
        Err(e) => println!("Failed to write {path}: {e}"),
    }
    Ok(())
}

fn delete_material(app: &mut App, selector: &str) -> anyhow::Result<()> {
    let Some(material_id) = find_material_id(app, selector) else {
        println!("Unknown material: {selector}");
        return Ok(());
    };
    if app.store.delete_material(&material_id)? {
        println!("Deleted.");
    }
    Ok(())
}
