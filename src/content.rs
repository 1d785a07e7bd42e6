//! Rendering routines, one per catalog material.
//!
//! Each routine describes its material as [`MaterialContent`] and lays it out on the canvas with
//! its own per-entry height budget. [`routine`] is the lookup table from kind to routine.

use crate::builder::Canvas;
use crate::catalog::{self, MaterialKind};
use crate::model::{Entry, EntryGroup, MaterialContent};

/// A function that draws one material onto a fresh canvas.
pub type RenderRoutine = fn(&mut Canvas);

/// Returns the rendering routine for `kind`.
pub fn routine(kind: MaterialKind) -> RenderRoutine {
    match kind {
        MaterialKind::Articulation => draw_articulation,
        MaterialKind::Games => draw_games,
        MaterialKind::TongueTwisters => draw_tongue_twisters,
        MaterialKind::Workbooks => draw_workbooks,
        MaterialKind::Breathing => draw_breathing,
    }
}

/// Returns the content a routine draws for `kind`.
pub fn content_for(kind: MaterialKind) -> MaterialContent {
    match kind {
        MaterialKind::Articulation => articulation(),
        MaterialKind::Games => games(),
        MaterialKind::TongueTwisters => tongue_twisters(),
        MaterialKind::Workbooks => workbooks(),
        MaterialKind::Breathing => breathing(),
    }
}

/// Lays out `content`: heading, subheading, intro lines, then every group.
///
/// Entries are checked against the remaining space one at a time, so page breaks fall between
/// entries and never inside one.
pub fn draw(canvas: &mut Canvas, content: &MaterialContent) {
    canvas.heading(content.heading());
    canvas.subheading(content.subheading());

    for line in content.intro() {
        canvas.paragraph(line);
    }

    let height = content.entry_height_mm();
    for group in content.groups() {
        if let Some(title) = group.title() {
            canvas.group_title(title, height);
        }
        for entry in group.entries() {
            canvas.entry(entry.title, entry.description, height);
        }
    }
}

fn header(kind: MaterialKind) -> MaterialContent {
    let record = catalog::record(kind);
    MaterialContent::new(record.display_name, record.description)
}

static ARTICULATION_EXERCISES: [Entry; 10] = [
    Entry::new("1. Лопаточка", "Широкий расслабленный язык лежит на нижней губе, счёт до десяти."),
    Entry::new("2. Иголочка", "Узкий язык тянется вперёд, губы в улыбке, удерживать 5 секунд."),
    Entry::new("3. Часики", "Кончик языка двигается из угла в угол рта под счёт взрослого."),
    Entry::new("4. Качели", "Язык поднимается к верхним зубам и опускается к нижним."),
    Entry::new("5. Чашечка", "Края широкого языка подняты вверх, язык держится у верхней губы."),
    Entry::new("6. Лошадка", "Присасывать язык к нёбу и щёлкать, рот широко открыт."),
    Entry::new("7. Грибок", "Присосать язык к нёбу и растягивать подъязычную связку."),
    Entry::new("8. Вкусное варенье", "Облизывать верхнюю губу широким языком сверху вниз."),
    Entry::new("9. Заборчик", "Улыбнуться с сомкнутыми зубами, удерживать под счёт."),
    Entry::new("10. Трубочка", "Вытянуть губы вперёд трубочкой, чередовать с заборчиком."),
];

fn articulation() -> MaterialContent {
    header(MaterialKind::Articulation)
        .with_intro_line("Выполняйте упражнения перед зеркалом, 5-7 минут каждый день.")
        .with_intro_line("Каждое упражнение повторяйте 5-6 раз, следите за симметрией.")
        .with_entries(&ARTICULATION_EXERCISES)
        .with_entry_height_mm(20.0)
}

fn draw_articulation(canvas: &mut Canvas) {
    draw(canvas, &articulation());
}

static GAMES_SOUNDS: [Entry; 8] = [
    Entry::new("Поймай звук", "Хлопнуть в ладоши, услышав заданный звук в ряду слогов."),
    Entry::new("Эхо", "Повторить за взрослым цепочку слогов с той же интонацией."),
    Entry::new("Звуковые часы", "Стрелка указывает на картинку, ребёнок называет первый звук."),
    Entry::new("Телеграф", "Отстучать слово по слогам и назвать количество слогов."),
    Entry::new("Живые звуки", "Дети изображают звуки и строят слово в правильном порядке."),
    Entry::new("Магазин", "Купить только предметы, в названии которых есть звук [Р]."),
    Entry::new("Цепочка слов", "Назвать слово, которое начинается на последний звук предыдущего."),
    Entry::new("Найди место звука", "Определить, где звук: в начале, середине или конце слова."),
];

static GAMES_VOCABULARY: [Entry; 8] = [
    Entry::new("Один - много", "Образовать множественное число: дом - дома, стул - стулья."),
    Entry::new("Назови ласково", "Подобрать уменьшительную форму: кот - котик, лиса - лисичка."),
    Entry::new("Чей хвост?", "Образовать притяжательные прилагательные: лисий, заячий."),
    Entry::new("Четвёртый лишний", "Найти лишний предмет среди четырёх и объяснить выбор."),
    Entry::new("Скажи наоборот", "Подобрать антонимы: высокий - низкий, день - ночь."),
    Entry::new("Что из чего?", "Назвать материал: стол из дерева - деревянный стол."),
    Entry::new("Кто что делает?", "Подобрать действия к предмету: птица летает, поёт, клюёт."),
    Entry::new("Угадай по описанию", "Отгадать предмет по трём признакам, затем загадать свой."),
];

static GAMES_MOTOR: [Entry; 6] = [
    Entry::new("Пальчики здороваются", "Поочерёдно касаться большим пальцем остальных пальцев."),
    Entry::new("Сухой бассейн", "Найти в крупе мелкие игрушки и назвать их."),
    Entry::new("Бусы", "Нанизывать бусины по образцу, проговаривая цвета."),
    Entry::new("Прищепки", "Прикрепить прищепки к картонному солнышку под стишок."),
    Entry::new("Шнуровка", "Продеть шнурок в отверстия, называя каждое действие."),
    Entry::new("Мозаика", "Выложить по образцу букву изучаемого звука."),
];

fn games() -> MaterialContent {
    header(MaterialKind::Games)
        .with_intro_line("Игры подходят для занятий в группе и дома, 10-15 минут на игру.")
        .with_group(EntryGroup::titled("Игры со звуками", &GAMES_SOUNDS))
        .with_group(EntryGroup::titled("Лексика и грамматика", &GAMES_VOCABULARY))
        .with_group(EntryGroup::titled("Мелкая моторика", &GAMES_MOTOR))
        .with_entry_height_mm(18.0)
}

fn draw_games(canvas: &mut Canvas) {
    draw(canvas, &games());
}

static PURE_SPEECH_DRILLS: [Entry; 7] = [
    Entry::new("Звук [С]", "Са-са-са - в лесу бегает лиса. Сы-сы-сы - у лисы хвост пушистый."),
    Entry::new("Звук [З]", "За-за-за - идёт домой коза. Зу-зу-зу - мы пасём козу."),
    Entry::new("Звук [Ц]", "Цы-цы-цы - по дорожке скачут кузнецы."),
    Entry::new("Звук [Ш]", "Ша-ша-ша - мама моет малыша. Шу-шу-шу - я письмо пишу."),
    Entry::new("Звук [Ж]", "Жу-жу-жу - молоко дадим ежу."),
    Entry::new("Звук [Л]", "Ла-ла-ла - у нас в доме тишина. Лу-лу-лу - стол стоит в углу."),
    Entry::new("Звук [Р]", "Ра-ра-ра - начинается игра. Ры-ры-ры - у мальчика шары."),
];

static TONGUE_TWISTERS: [Entry; 6] = [
    Entry::new("Саша", "Шла Саша по шоссе и сосала сушку."),
    Entry::new("Карл и Клара", "Карл у Клары украл кораллы, а Клара у Карла украла кларнет."),
    Entry::new("Ёж и ёлка", "У ежа ежата, у ужа ужата."),
    Entry::new("Топот", "От топота копыт пыль по полю летит."),
    Entry::new("Цыплёнок", "Цыплёнок цапли цепко цеплялся за цепь."),
    Entry::new("Дрова", "На дворе трава, на траве дрова."),
];

fn tongue_twisters() -> MaterialContent {
    header(MaterialKind::TongueTwisters)
        .with_intro_line("Проговаривайте сначала медленно и чётко, затем постепенно ускоряйтесь.")
        .with_group(EntryGroup::titled("Чистоговорки", &PURE_SPEECH_DRILLS))
        .with_group(EntryGroup::titled("Скороговорки", &TONGUE_TWISTERS))
        .with_entry_height_mm(14.0)
}

fn draw_tongue_twisters(canvas: &mut Canvas) {
    draw(canvas, &tongue_twisters());
}

static WORKBOOK_TASKS: [Entry; 8] = [
    Entry::new("Задание 1. Слушаем тишину", "Назвать все звуки, услышанные за минуту с закрытыми глазами."),
    Entry::new("Задание 2. Громко - тихо", "Отличить громкое звучание бубна от тихого и показать карточку."),
    Entry::new("Задание 3. Похожие слова", "Раскрасить картинки, названия которых отличаются одним звуком."),
    Entry::new("Задание 4. Первый звук", "Соединить линией картинку и букву, с которой начинается слово."),
    Entry::new("Задание 5. Твёрдый - мягкий", "Закрасить синим твёрдые согласные, зелёным - мягкие."),
    Entry::new("Задание 6. Звуковая схема", "Выложить фишками схему слова: гласные, согласные, мягкие."),
    Entry::new("Задание 7. Слоговые домики", "Поселить картинки в домики по количеству слогов."),
    Entry::new("Задание 8. Ошибка Незнайки", "Найти и исправить слово, в котором перепутан звук."),
];

fn workbooks() -> MaterialContent {
    header(MaterialKind::Workbooks)
        .with_intro_line("Тетрадь рассчитана на детей 5-7 лет и выполняется вместе со взрослым.")
        .with_intro_line("Одно задание за занятие; повторяйте пройденное в конце недели.")
        .with_intro_line("Для заданий понадобятся цветные карандаши и фишки трёх цветов.")
        .with_entries(&WORKBOOK_TASKS)
        .with_entry_height_mm(22.0)
}

fn draw_workbooks(canvas: &mut Canvas) {
    draw(canvas, &workbooks());
}

static BREATHING_EXERCISES: [Entry; 10] = [
    Entry::new("Задуй свечу", "Длинный плавный выдох на пламя воображаемой свечи."),
    Entry::new("Футбол", "Загнать ватный шарик в ворота направленной воздушной струёй."),
    Entry::new("Снегопад", "Сдувать с ладони кусочки ваты, как снежинки."),
    Entry::new("Кораблик", "Дуть на бумажный кораблик в тазу с водой, не надувая щёк."),
    Entry::new("Бабочка", "Сдувать бумажную бабочку с нитки плавным выдохом."),
    Entry::new("Шарик", "Вдох носом с надуванием живота, выдох ртом со сдуванием."),
    Entry::new("Ветерок", "Подуть на вертушку сначала слабо, затем сильно."),
    Entry::new("Буря в стакане", "Дуть через трубочку в стакан с водой, выдох долгий."),
    Entry::new("Ёжик", "Повороты головы с коротким шумным вдохом носом."),
    Entry::new("Насос", "Наклоны вперёд с вдохом, выпрямление с выдохом на звук [С]."),
];

fn breathing() -> MaterialContent {
    header(MaterialKind::Breathing)
        .with_intro_line("Занимайтесь в проветренном помещении, не более 3-5 повторов подряд.")
        .with_entries(&BREATHING_EXERCISES)
        .with_entry_height_mm(20.0)
}

fn draw_breathing(canvas: &mut Canvas) {
    draw(canvas, &breathing());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transliterate::transliterate;

    /// Widest line that fits the text column at 10pt Helvetica with room to spare.
    const MAX_LINE_CHARS: usize = 90;

    #[test]
    fn every_kind_has_entries_and_catalog_heading() {
        for kind in MaterialKind::ALL {
            let content = content_for(kind);
            assert!(content.entry_count() > 0);
            assert_eq!(content.heading(), catalog::record(kind).display_name);
        }
    }

    #[test]
    fn lines_fit_the_text_column_after_transliteration() {
        for kind in MaterialKind::ALL {
            let content = content_for(kind);
            for group in content.groups() {
                for entry in group.entries() {
                    let latin = transliterate(entry.description);
                    assert!(
                        latin.len() <= MAX_LINE_CHARS,
                        "{kind}: '{latin}' is {} chars",
                        latin.len()
                    );
                }
            }
            for line in content.intro() {
                assert!(transliterate(line).len() <= MAX_LINE_CHARS);
            }
        }
    }

    #[test]
    fn games_list_more_entries_than_one_page_holds() {
        assert!(content_for(MaterialKind::Games).entry_count() > 12);
    }
}
