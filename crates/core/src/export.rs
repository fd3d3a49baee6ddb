//! Printable HTML rendering of a cohort's weekly routine.

use crate::{
    catalog::Catalog,
    models::routine::{Day, WeeklyRoutine},
};

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; margin: 20px; }
    table { width: 100%; border-collapse: collapse; margin-top: 20px; table-layout: fixed; }
    th, td { border: 1px solid black; padding: 8px; text-align: center; vertical-align: top; font-size: 12px; }
    th { background-color: #f0f0f0; font-weight: bold; }
    .header { text-align: center; margin-bottom: 20px; }
    .subject { font-weight: bold; }
    .room, .teacher { color: #666; font-size: 11px; }
    @media print {
      body { -webkit-print-color-adjust: exact; print-color-adjust: exact; }
      @page { size: landscape; margin: 1cm; }
    }
"#;

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renders one row per teaching period and one column per day.
pub fn render_routine_html(routine: &WeeklyRoutine, catalog: &Catalog) -> String {
    let department = escape(&routine.department);
    let semester = routine.semester;

    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{department} - Semester {semester}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <div class=\"header\">\n<h1>Class Routine</h1>\n<h2>{department} - Semester {semester}</h2>\n</div>\n\
         <table>\n<thead>\n<tr><th style=\"width: 100px;\">Time/Day</th>"
    );
    for day in Day::ALL {
        html.push_str(&format!("<th>{day}</th>"));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for period in catalog.time_slots() {
        html.push_str(&format!(
            "<tr><td>{} - {}</td>",
            escape(&period.start),
            escape(&period.end)
        ));
        for day in Day::ALL {
            html.push_str("<td>");
            for slot in routine
                .slots
                .iter()
                .filter(|slot| slot.day == day && catalog.canonical_start(&slot.start_time) == period.start)
            {
                html.push_str(&format!(
                    "<div class=\"subject\">{}</div><div class=\"room\">Room: {}</div><div class=\"teacher\">Teacher: {}</div>",
                    escape(&catalog.subject_label(&slot.subject_id)),
                    escape(&slot.room_no),
                    escape(&slot.teacher_id),
                ));
                if slot.end_time != period.end {
                    html.push_str(&format!("<div class=\"room\">Until {}</div>", escape(&slot.end_time)));
                }
            }
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}
