use serde_json::Value;

use crate::{
    foundation::error::{EngineError, EngineResult},
    script::model::Script,
};

const MODES: [&str; 3] = ["composed_stack", "vertical_list", "word_by_word"];
const ROLES: [&str; 5] = [
    "avatar",
    "prop",
    "prop_secondary",
    "prop_tertiary",
    "background",
];

/// Validate a raw JSON document against the script schema and parse it.
///
/// Every violation is collected before returning, so a caller sees the full
/// picture in one [`EngineError::Schema`]. Any error here is fatal: the
/// session must render diagnostic frames instead of content.
pub fn validate_script(doc: &Value) -> EngineResult<Script> {
    let mut errors = Vec::new();

    check_settings(doc, &mut errors);
    check_scenes(doc, &mut errors);
    check_subtitles(doc, &mut errors);
    check_text_track(doc, &mut errors);

    if !doc.get("audio_path").is_some_and(Value::is_string) {
        errors.push("audio_path must be a string".to_string());
    }

    if !errors.is_empty() {
        return Err(EngineError::Schema(errors));
    }

    serde_json::from_value(doc.clone()).map_err(|e| EngineError::Schema(vec![e.to_string()]))
}

fn check_settings(doc: &Value, errors: &mut Vec<String>) {
    let settings = doc.get("settings").or_else(|| doc.get("project_settings"));
    let Some(settings) = settings else {
        errors.push("missing settings".to_string());
        return;
    };
    if !settings.get("fps").is_some_and(Value::is_number) {
        errors.push("settings.fps must be a number".to_string());
    }
    for field in ["width", "height"] {
        if !settings.get(field).is_some_and(Value::is_u64) {
            errors.push(format!("settings.{field} must be a positive integer"));
        }
    }
}

fn check_scenes(doc: &Value, errors: &mut Vec<String>) {
    let Some(scenes) = doc.get("scenes").and_then(Value::as_array) else {
        errors.push("scenes must be an array".to_string());
        return;
    };
    for (index, scene) in scenes.iter().enumerate() {
        if !has_nonempty_str(scene, "id") {
            errors.push(format!("scenes[{index}].id is required"));
        }
        for field in ["start", "duration"] {
            if !scene.get(field).is_some_and(Value::is_number) {
                errors.push(format!("scenes[{index}].{field} must be a number"));
            }
        }
        if !has_nonempty_str(scene, "layout") {
            errors.push(format!("scenes[{index}].layout is required"));
        }
        let Some(elements) = scene.get("elements").and_then(Value::as_array) else {
            errors.push(format!("scenes[{index}].elements must be an array"));
            continue;
        };
        for (ei, element) in elements.iter().enumerate() {
            if !has_nonempty_str(element, "id") {
                errors.push(format!("scenes[{index}].elements[{ei}].id is required"));
            }
            match element.get("role").and_then(Value::as_str) {
                Some(role) if ROLES.contains(&role) => {}
                _ => errors.push(format!(
                    "scenes[{index}].elements[{ei}].role must be one of {}",
                    ROLES.join(", ")
                )),
            }
        }
    }
}

fn check_subtitles(doc: &Value, errors: &mut Vec<String>) {
    let Some(subtitles) = doc.get("subtitles").and_then(Value::as_array) else {
        errors.push("subtitles must be an array".to_string());
        return;
    };
    for (index, subtitle) in subtitles.iter().enumerate() {
        if !has_nonempty_str(subtitle, "id") {
            errors.push(format!("subtitles[{index}].id is required"));
        }
        let mode = subtitle.get("mode").and_then(Value::as_str);
        match mode {
            Some(m) if MODES.contains(&m) => {}
            _ => errors.push(format!(
                "subtitles[{index}].mode must be one of {}",
                MODES.join(", ")
            )),
        }
        let container_end = subtitle.get("container_end").and_then(Value::as_f64);
        if container_end.is_none() {
            errors.push(format!("subtitles[{index}].container_end must be a number"));
        }

        match mode {
            Some("composed_stack") => {
                let Some(lines) = subtitle.get("lines").and_then(Value::as_array) else {
                    errors.push(format!(
                        "subtitles[{index}].lines must be an array for composed_stack mode"
                    ));
                    continue;
                };
                for (li, line) in lines.iter().enumerate() {
                    if !has_nonempty_str(line, "style") {
                        errors.push(format!("subtitles[{index}].lines[{li}].style is required"));
                    }
                    let path = format!("subtitles[{index}].lines[{li}].words");
                    check_words(line.get("words"), &path, container_end, errors);
                }
            }
            Some("vertical_list") => {
                let Some(items) = subtitle.get("items").and_then(Value::as_array) else {
                    errors.push(format!(
                        "subtitles[{index}].items must be an array for vertical_list mode"
                    ));
                    continue;
                };
                let mut prev = f64::NEG_INFINITY;
                for (ii, item) in items.iter().enumerate() {
                    if !has_nonempty_str(item, "text") {
                        errors.push(format!("subtitles[{index}].items[{ii}].text is required"));
                    }
                    match item.get("start").and_then(Value::as_f64) {
                        Some(start) => {
                            if start < prev {
                                errors.push(format!(
                                    "subtitles[{index}].items[{ii}].start must be non-decreasing"
                                ));
                            }
                            prev = start;
                            if let Some(end) = container_end
                                && start > end
                            {
                                errors.push(format!(
                                    "subtitles[{index}].items[{ii}].start exceeds container_end"
                                ));
                            }
                        }
                        None => errors.push(format!(
                            "subtitles[{index}].items[{ii}].start must be a number"
                        )),
                    }
                }
            }
            Some("word_by_word") => {
                let path = format!("subtitles[{index}].words");
                check_words(subtitle.get("words"), &path, container_end, errors);
            }
            _ => {}
        }
    }
}

fn check_words(words: Option<&Value>, path: &str, container_end: Option<f64>, errors: &mut Vec<String>) {
    let Some(words) = words.and_then(Value::as_array) else {
        errors.push(format!("{path} must be an array"));
        return;
    };
    let mut prev_start = f64::NEG_INFINITY;
    for (wi, word) in words.iter().enumerate() {
        if !has_nonempty_str(word, "text") {
            errors.push(format!("{path}[{wi}].text is required"));
        }
        let start = word.get("start").and_then(Value::as_f64);
        let end = word.get("end").and_then(Value::as_f64);
        if start.is_none() {
            errors.push(format!("{path}[{wi}].start must be a number"));
        }
        if end.is_none() {
            errors.push(format!("{path}[{wi}].end must be a number"));
        }
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                errors.push(format!("{path}[{wi}] has start > end"));
            }
            if start < prev_start {
                errors.push(format!("{path}[{wi}].start must be non-decreasing"));
            }
            prev_start = start;
            if let Some(container) = container_end
                && end > container
            {
                errors.push(format!("{path}[{wi}].end exceeds container_end"));
            }
        }
    }
}

fn check_text_track(doc: &Value, errors: &mut Vec<String>) {
    let Some(track) = doc.get("text_track") else {
        return; // optional
    };
    let Some(items) = track.as_array() else {
        errors.push("text_track must be an array".to_string());
        return;
    };
    for (index, item) in items.iter().enumerate() {
        if !has_nonempty_str(item, "text") {
            errors.push(format!("text_track[{index}].text is required"));
        }
        for field in ["start", "end"] {
            if !item.get(field).is_some_and(Value::is_number) {
                errors.push(format!("text_track[{index}].{field} must be a number"));
            }
        }
    }
}

fn has_nonempty_str(value: &Value, field: &str) -> bool {
    value
        .get(field)
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/script/validate.rs"]
mod tests;
