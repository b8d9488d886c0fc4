//! Coordinate conversion between winit window sizes and wry rects.

/// A rect covering the whole client area of a window of the given logical size.
pub fn full_window_rect(width: f64, height: f64) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(width, height)),
    }
}

/// Logical client-area rect for `window`.
pub fn window_rect(window: &winit::window::Window) -> wry::Rect {
    let size = window
        .inner_size()
        .to_logical::<f64>(window.scale_factor());
    full_window_rect(size.width, size.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_starts_at_origin() {
        let rect = full_window_rect(1280.0, 800.0);

        match rect.position {
            wry::dpi::Position::Logical(pos) => {
                assert_eq!(pos.x, 0.0);
                assert_eq!(pos.y, 0.0);
            }
            _ => panic!("Expected logical position"),
        }
        match rect.size {
            wry::dpi::Size::Logical(size) => {
                assert!((size.width - 1280.0).abs() < f64::EPSILON);
                assert!((size.height - 800.0).abs() < f64::EPSILON);
            }
            _ => panic!("Expected logical size"),
        }
    }
}
