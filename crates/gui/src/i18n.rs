use std::sync::atomic::{AtomicU8, Ordering};

use crate::state::Language;

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Language {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Language::En,
        _ => Language::Ru,
    }
}

pub fn set_lang(l: Language) {
    CURRENT_LANG.store(
        match l {
            Language::Ru => 0,
            Language::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Language::Ru;
    match key {
        // ── Toolbar ─────────────────────────────────────────
        "tb.extrude" => if ru { "Выдавливание" } else { "Extrude" },
        "tb.polygon" => if ru { "Полигон" } else { "Polygon" },
        "tb.select" => if ru { "Выбор" } else { "Select" },
        "tb.trash" => if ru { "Удалить фигуру" } else { "Trash" },
        "tb.delete_layer" => if ru { "Удалить здание" } else { "Delete building" },
        "tb.language" => if ru { "Язык" } else { "Language" },

        "tip.extrude" => if ru { "Клик по полигону выбирает его для выдавливания" } else { "Click a polygon to pick it for extrusion" },
        "tip.polygon" => if ru { "Рисование полигона: клики по вершинам, завершение по Enter или двойному клику" } else { "Draw a polygon: click vertices, Enter or double-click to finish" },
        "tip.select" => if ru { "Выбор нарисованных фигур" } else { "Select drawn shapes" },
        "tip.trash" => if ru { "Удалить выбранную фигуру" } else { "Delete the selected shape" },
        "tip.delete_layer" => if ru { "Удалить выделенное здание  Del" } else { "Delete the highlighted building  Del" },

        // ── Height panel ────────────────────────────────────
        "height.title" => if ru { "Высота" } else { "Height" },
        "height.hint" => if ru { "метры, только цифры" } else { "meters, digits only" },
        "height.apply" => if ru { "Выдавить" } else { "Extrude" },
        "height.invalid" => if ru { "Допустимы только цифры" } else { "Digits only" },
        "height.no_polygon" => if ru { "Сначала выберите полигон в режиме выдавливания" } else { "Pick a polygon in extrude mode first" },
        "height.no_selection" => if ru { "Нет выделенного здания" } else { "No building selected" },
        "height.captured" => if ru { "Выбран полигон" } else { "Picked polygon" },
        "height.none" => if ru { "Полигон не выбран" } else { "No polygon picked" },

        // ── Status bar ──────────────────────────────────────
        "status.mode" => if ru { "Режим" } else { "Mode" },
        "status.layers" => if ru { "Здания" } else { "Buildings" },
        "status.selected" => if ru { "Выделено" } else { "Selected" },
        "status.vertices" => if ru { "Вершины" } else { "Vertices" },

        "mode.extrude" => if ru { "выдавливание" } else { "extrude" },
        "mode.draw_polygon" => if ru { "рисование" } else { "drawing" },
        "mode.simple_select" => if ru { "выбор" } else { "select" },

        _ => "???",
    }
}
