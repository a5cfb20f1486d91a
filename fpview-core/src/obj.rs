/// Wavefront OBJ subset loader (`v` and `f` records)
use nom::{
    bytes::complete::take_till,
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map_res, opt},
    multi::{many0, separated_list1},
    number::complete::float,
    sequence::{preceded, terminated, tuple},
    IResult,
};
use std::fs;
use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::geometry::{Face, Mesh, Vertex};

/// Read and parse an OBJ file
pub fn load_obj<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mesh = parse_obj(&text)?;
    log::info!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.vertices().len(),
        mesh.faces().len()
    );
    Ok(mesh)
}

/// Parse OBJ text.
///
/// Lines starting with `v` add a vertex and lines starting with `f` add one
/// face per fan triangle, with 1-based indices made 0-based. Every other
/// line is skipped.
pub fn parse_obj(input: &str) -> LoadResult<Mesh> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();

    for (number, line) in input.lines().enumerate() {
        let line_number = number + 1;
        let Some(token) = line.split_whitespace().next() else {
            continue;
        };

        match token {
            "v" => {
                let (_, vertex) = all_consuming(vertex_record)(line)
                    .map_err(|_| malformed(line_number, "v", line))?;
                vertices.push(vertex);
            }
            "f" => {
                let (_, indices) = all_consuming(face_record)(line)
                    .map_err(|_| malformed(line_number, "f", line))?;
                if indices.len() < 3 || indices.contains(&0) {
                    return Err(malformed(line_number, "f", line));
                }

                let first = indices[0] - 1;
                for pair in indices[1..].windows(2) {
                    faces.push(Face::new(first, pair[0] - 1, pair[1] - 1));
                }
            }
            _ => {}
        }
    }

    Mesh::new(vertices, faces)
}

fn malformed(line: usize, kind: &'static str, text: &str) -> LoadError {
    LoadError::Malformed {
        line,
        kind,
        text: text.trim().to_string(),
    }
}

fn vertex_record(input: &str) -> IResult<&str, Vertex> {
    let (input, _) = preceded(space0, char('v'))(input)?;
    let (input, (x, y, z)) = tuple((
        preceded(space1, float),
        preceded(space1, float),
        preceded(space1, float),
    ))(input)?;
    // Homogeneous weight or per-vertex colour, dropped
    let (input, _) = many0(preceded(space1, float))(input)?;
    let (input, _) = space0(input)?;
    Ok((input, Vertex::new(x, y, z)))
}

fn face_record(input: &str) -> IResult<&str, Vec<usize>> {
    let (input, _) = preceded(space0, char('f'))(input)?;
    let (input, _) = space1(input)?;
    terminated(separated_list1(space1, face_index), space0)(input)
}

/// A face corner: `v`, `v/vt`, `v//vn` or `v/vt/vn`; only `v` is kept
fn face_index(input: &str) -> IResult<&str, usize> {
    let (input, index) = map_res(digit1, str::parse::<usize>)(input)?;
    let (input, _) = opt(preceded(char('/'), take_till(|c: char| c.is_whitespace())))(input)?;
    Ok((input, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_parse_vertices_and_faces() {
        let text = "\
# a single triangle
v 0 0 5
v 1.0 0.0 5.0
v 0 1 5e0
f 1 2 3
";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.vertices()[1], Point3::new(1.0, 0.0, 5.0));
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_ignores_unknown_records() {
        let text = "\
o thing
vn 0 0 1
vt 0.5 0.5
v -1 -1 0
v 1 -1 0
v 0 1 0

usemtl none
s off
f 1/1/1 2/2/1 3//1
";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2)]);
    }

    #[test]
    fn test_ignores_extra_vertex_components() {
        // colour triplet, homogeneous weight, colour with trailing space
        let text = "v 0 0 0 1.0 0.5 0.2\nv 1 0 0 1.0\nv 0 1 0 0.1 0.2 0.3 \nf 1 2 3\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.vertices()[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(mesh.vertices()[1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.vertices()[2], Point3::new(0.0, 1.0, 0.0));

        assert!(matches!(
            parse_obj("v 0 0 0 red\n"),
            Err(LoadError::Malformed { line: 1, kind: "v", .. })
        ));
    }

    #[test]
    fn test_fan_triangulates_polygons() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2), Face::new(0, 2, 3)]);
    }

    #[test]
    fn test_faces_may_precede_vertices() {
        let text = "f 1 2 3\nv 0 0 0\nv 1 0 0\nv 0 1 0\r\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.faces().len(), 1);
    }

    #[test]
    fn test_malformed_records() {
        assert!(matches!(
            parse_obj("v 1 2\n"),
            Err(LoadError::Malformed { line: 1, kind: "v", .. })
        ));
        assert!(matches!(
            parse_obj("v 0 0 0\nf 1 x 1\n"),
            Err(LoadError::Malformed { line: 2, kind: "f", .. })
        ));
        assert!(matches!(
            parse_obj("v 0 0 0\nf 0 1 1\n"),
            Err(LoadError::Malformed { line: 2, .. })
        ));
        assert!(matches!(
            parse_obj("v 0 0 0\nf 1 1\n"),
            Err(LoadError::Malformed { line: 2, .. })
        ));
    }

    #[test]
    fn test_out_of_range_face() {
        assert!(matches!(
            parse_obj("v 0 0 0\nf 1 2 3\n"),
            Err(LoadError::FaceIndexOutOfRange { index: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("fpview-core-missing-mesh.obj");
        let _ = fs::remove_file(&path);
        assert!(matches!(load_obj(&path), Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("fpview-core-{}.obj", std::process::id()));
        fs::write(&path, "v 0 0 0\nv 0 0 0\nv 0 0 0\nf 1 2 3\n").unwrap();
        let mesh = load_obj(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(mesh.faces().len(), 1);
    }
}
