// tests/merge_properties.rs
use proptest::prelude::*;
use pvd2tec::*;
use std::collections::HashSet;

// Coordinates on a coarse lattice so partitions share points often.
fn lattice_point() -> impl Strategy<Value = Point3> {
    (0..4i32, 0..4i32, 0..3i32).prop_map(|(x, y, z)| [x as f64, y as f64 * 0.5, z as f64])
}

fn local_mesh() -> impl Strategy<Value = LocalMesh> {
    prop::collection::vec(lattice_point(), 1..12).prop_flat_map(|points| {
        let n = points.len() as u32;
        let cells = prop::collection::vec([0..n, 0..n, 0..n, 0..n], 0..6);
        (Just(points), cells).prop_map(|(points, cells)| LocalMesh::new(points, cells))
    })
}

proptest! {
    #[test]
    fn merged_points_are_unique(meshes in prop::collection::vec(local_mesh(), 0..5)) {
        let total: usize = meshes.iter().map(|m| m.points.len()).sum();
        let mesh = MeshMerger::merge_local(meshes).unwrap();

        prop_assert!(mesh.num_points() <= total);
        let keys: HashSet<CoordKey> = mesh.points().iter().map(CoordKey::new).collect();
        prop_assert_eq!(keys.len(), mesh.num_points());
    }

    #[test]
    fn merged_cells_keep_their_geometry(meshes in prop::collection::vec(local_mesh(), 1..5)) {
        let expected: Vec<[Point3; 4]> = meshes
            .iter()
            .flat_map(|m| m.cells.iter().map(move |cell| cell.map(|i| m.points[i as usize])))
            .collect();
        let mesh = MeshMerger::merge_local(meshes).unwrap();

        prop_assert_eq!(mesh.num_cells(), expected.len());
        for (cell, corners) in mesh.cells().iter().zip(&expected) {
            for (&index, corner) in cell.iter().zip(corners) {
                prop_assert!((index as usize) < mesh.num_points());
                prop_assert_eq!(mesh.points()[index as usize], *corner);
            }
        }
    }

    #[test]
    fn every_input_point_is_indexed(meshes in prop::collection::vec(local_mesh(), 1..5)) {
        let inputs: Vec<Point3> = meshes.iter().flat_map(|m| m.points.clone()).collect();
        let mesh = MeshMerger::merge_local(meshes).unwrap();

        for point in &inputs {
            let index = mesh.index_of(point);
            prop_assert!(index.is_some());
            prop_assert_eq!(mesh.points()[index.unwrap() as usize], *point);
        }
    }
}
