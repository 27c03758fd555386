use lineage_core::{ClassKind, FileId, GlobalSymbols, Location, ParsedFile, Symbol, SymbolTable};
use lineage_graph::{gen_descendants_report, IgnorePatterns, PatchTable, SubclassMapBuilder};

fn inherit(file: &mut ParsedFile, parent: Symbol, kind: ClassKind, child: Symbol, loc: Location) {
    let def = file.define(child);
    file.inherit(parent, kind, def, loc);
}

#[test]
fn test_reopened_class_keeps_first_definition() {
    let mut symbols = GlobalSymbols::new();
    let _root = symbols.add_file("unused.rb");
    let dog_file = symbols.add_file("app/models/dog.rb");
    assert_eq!(dog_file, FileId::new(1));

    let animal = symbols.enter("Animal", ClassKind::Class, Some(Location::new(dog_file, 0, 6)));
    let dog = symbols.enter("Dog", ClassKind::Class, Some(Location::new(dog_file, 10, 40)));

    let mut first = ParsedFile::new("app/models/dog.rb");
    inherit(&mut first, animal, ClassKind::Class, dog, Location::new(dog_file, 10, 40));
    let mut reopened = ParsedFile::new("app/models/dog.rb");
    inherit(&mut reopened, animal, ClassKind::Class, dog, Location::new(dog_file, 50, 80));

    let mut builder = SubclassMapBuilder::new(&symbols, IgnorePatterns::none());
    builder.add_files([&reopened, &first]);
    let mut map = builder.build();

    let info = map.get(animal).unwrap().entries[&dog];
    assert_eq!(info.defining_loc, Some(Location::new(dog_file, 10, 40)));

    let lines =
        gen_descendants_report(&symbols, &mut map, &mut [animal], &PatchTable::default()).unwrap();
    assert_eq!(lines, ["class Animal", " class Dog app/models/dog.rb"]);
}

#[test]
fn test_ignored_files_and_runtime_mixin() {
    let mut symbols = GlobalSymbols::new();
    let lib = symbols.add_file("lib/opus/safe_machine.rb");
    let charge_file = symbols.add_file("lib/opus/risk/charge.rb");
    let test_file = symbols.add_file("test/fake_charge.rb");

    let at = |file, begin| Some(Location::new(file, begin, begin + 10));
    let safe_machine = symbols.enter("Opus::SafeMachine", ClassKind::Module, at(lib, 0));
    let risk = symbols.enter(
        "Opus::Risk::Model::Mixins::RiskSafeMachine",
        ClassKind::Module,
        at(lib, 100),
    );
    let charge = symbols.enter("Opus::Risk::Charge", ClassKind::Class, at(charge_file, 0));
    let fake = symbols.enter("FakeCharge", ClassKind::Class, at(test_file, 0));
    let machine = symbols.enter("Opus::Machine", ClassKind::Class, at(lib, 200));

    let mut charge_src = ParsedFile::new("lib/opus/risk/charge.rb");
    inherit(&mut charge_src, risk, ClassKind::Module, charge, Location::new(charge_file, 0, 10));
    inherit(&mut charge_src, safe_machine, ClassKind::Module, machine, Location::new(charge_file, 30, 40));

    let mut test_src = ParsedFile::new("test/fake_charge.rb");
    inherit(&mut test_src, risk, ClassKind::Module, fake, Location::new(test_file, 0, 10));

    let ignore = IgnorePatterns::new(Vec::<String>::new(), ["test"]);
    let mut builder = SubclassMapBuilder::new(&symbols, ignore);
    builder.add_files([&charge_src, &test_src]);
    assert_eq!(builder.files_ignored(), 1);
    let mut map = builder.build();

    let mut parents = vec![safe_machine, risk];
    let lines =
        gen_descendants_report(&symbols, &mut map, &mut parents, &PatchTable::default()).unwrap();

    assert_eq!(symbols.show(parents[0]).unwrap(), "Opus::Risk::Model::Mixins::RiskSafeMachine");
    assert_eq!(
        lines,
        [
            "module Opus::Risk::Model::Mixins::RiskSafeMachine",
            " class Opus::Risk::Charge lib/opus/risk/charge.rb",
            "module Opus::SafeMachine",
            " class Opus::Machine lib/opus/risk/charge.rb",
            " class Opus::Risk::Charge lib/opus/risk/charge.rb",
        ]
    );
}
