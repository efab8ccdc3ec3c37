use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(span.contains(15));
    assert!(!span.contains(20));
}

#[test]
fn test_span_merge() {
    let merged = Span::new(10, 20).merge(Span::new(15, 30));
    assert_eq!(merged, Span::new(10, 30));
}

#[test]
fn test_merge_ignores_dummy() {
    let real = Span::new(4, 9);
    assert_eq!(real.merge(Span::DUMMY), real);
    assert_eq!(Span::DUMMY.merge(real), real);
}

#[test]
fn test_dummy_is_distinguishable() {
    assert!(Span::DUMMY.is_dummy());
    assert!(!Span::new(0, 0).is_dummy());
    assert_eq!(format!("{:?}", Span::DUMMY), "<generated>");
}

#[test]
fn test_from_range() {
    assert_eq!(Span::from_range(50..100), Some(Span::new(50, 100)));
}

#[cfg(target_pointer_width = "64")]
#[test]
fn test_from_range_overflow() {
    let too_big = u32::MAX as usize + 1;
    assert_eq!(Span::from_range(0..too_big), None);
}

#[test]
fn test_point_is_empty() {
    let point = Span::point(7);
    assert!(point.is_empty());
    assert!(!point.contains(7));
}
