#![allow(missing_docs)] // test only
use qbfkit_aig::{aag, sim, Aig, Lit};
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_aig(rng: &mut SmallRng, inputs: usize, gates: usize) -> Aig {
    let mut aig = Aig::new();
    let mut lits: Vec<Lit> = (0..inputs)
        .map(|i| aig.input(&format!("in {i}")))
        .collect();
    lits.push(Lit::TRUE);
    for _ in 0..gates {
        let a = lits[rng.gen_range(0..lits.len())] ^ rng.gen::<bool>();
        let b = lits[rng.gen_range(0..lits.len())] ^ rng.gen::<bool>();
        let gate = aig.and(a, b);
        lits.push(gate);
    }
    for i in 0..rng.gen_range(1..4) {
        let lit = lits[rng.gen_range(0..lits.len())] ^ rng.gen::<bool>();
        aig.add_output(format!("out{i}"), lit);
    }
    aig
}

#[test]
fn written_circuits_read_back_equivalent() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..50 {
        let inputs = rng.gen_range(0..8);
        let gates = rng.gen_range(0..40);
        let original = random_aig(&mut rng, inputs, gates);

        let mut buf = vec![];
        aag::write(&original, &mut buf).unwrap();
        let read = aag::read(buf.as_slice()).unwrap();

        assert_eq!(
            read.input_names().collect::<Vec<_>>(),
            original.input_names().collect::<Vec<_>>()
        );
        assert_eq!(
            read.outputs().map(|(name, _)| name).collect::<Vec<_>>(),
            original.outputs().map(|(name, _)| name).collect::<Vec<_>>()
        );

        for code in 0..1u32 << inputs {
            let assignment = |name: &str| {
                let index: u32 = name.strip_prefix("in ").unwrap().parse().unwrap();
                (code >> index) & 1 != 0
            };
            assert_eq!(read.evaluate(assignment), original.evaluate(assignment));
        }
    }
}

#[test]
fn files_in_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("circuit.aag");

    let mut aig = Aig::new();
    let x = aig.input("x");
    let y = aig.input("y");
    let out = aig.or(x, y);
    aig.add_output("prop", out);

    aag::write_file(&aig, &path).unwrap();
    let mut read = aag::read_file(&path).unwrap();

    let x = read.find_input("x").unwrap();
    let y = read.find_input("y").unwrap();
    let expected = read.or(x, y);
    let (name, lit) = read.output(0);
    assert_eq!(name, "prop");
    assert!(sim::equivalent(&mut read, lit, expected));
}
